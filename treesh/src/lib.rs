//! # Treesh
//!
//! Engines behind the Treesh Arcade and stories screens.
//!
//! Every engine is a synchronous, owned, in-memory reducer: operations take
//! `&mut self` plus the current instant, and randomness comes from an injected
//! [`RandomSource`]. The async [`service`] layer wraps them behind the
//! [`DataService`] trait with simulated latency, and [`stories::StoryActor`]
//! runs the story engine on a tokio task with a periodic expiry sweep.
//!
//! ## Core Modules
//!
//! - [`arcade`]: candidate filtering, swipe decisions, match draws, blocks and reports
//! - [`chat`]: PIN-gated match threads with attempt throttling
//! - [`stories`]: ephemeral stories, expiry sweeps and display helpers
//! - [`settings`]: user settings with field-level updates
//! - [`service`]: async data-service seam and its in-memory demo backend
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use treesh::{ArcadeSession, EngineConfig, SequenceRandom, SwipeAction, service};
//!
//! let mut session = ArcadeSession::new(
//!     service::demo_candidates(),
//!     &EngineConfig::default(),
//!     Box::new(SequenceRandom::new([0.1])),
//! );
//!
//! let outcome = session.decide("1", SwipeAction::Like, Utc::now()).unwrap();
//! assert!(outcome.is_match());
//! ```

pub mod arcade;
pub mod chat;
pub mod clock;
pub mod config;
pub mod errors;
pub mod random;
pub mod security;
pub mod service;
pub mod settings;
pub mod stories;

pub use arcade::{
    ArcadeError, ArcadeSession, Candidate, DiscoveryEngine, DiscoveryFilters, Match, SwipeAction,
    filter_candidates,
};
pub use chat::{ChatError, ChatGate, ChatPin, GateState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, EngineConfig};
pub use errors::ErrorKind;
pub use random::{RandomSource, SequenceRandom, StdRandom};
pub use service::{DataService, DemoService, ServiceError};
pub use settings::UserSettings;
pub use stories::{Story, StoryActor, StoryEngine, StoryError};
