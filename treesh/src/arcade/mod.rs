//! Arcade: candidate discovery, swipe decisions and matches.
//!
//! [`DiscoveryEngine`] is a synchronous reducer over an owned candidate pool.
//! A positive decision draws once from the injected [`RandomSource`]; a
//! successful draw creates a [`Match`] with a fresh chat PIN. [`ArcadeSession`]
//! pairs the engine with the [`ChatGate`] guarding match threads.
//!
//! [`RandomSource`]: crate::random::RandomSource
//! [`ChatGate`]: crate::chat::ChatGate

pub mod engine;
pub mod errors;
pub mod filters;
pub mod models;
pub mod session;

pub use engine::DiscoveryEngine;
pub use errors::{ArcadeError, ArcadeResult};
pub use filters::{DiscoveryFilters, filter_candidates};
pub use models::{
    ArcadeStats, BlockedUser, Candidate, CandidateId, Match, MatchId, Report, ReportAck,
    ReportStatus, ReportType, SwipeAction, SwipeDecision, SwipeOutcome,
};
pub use session::ArcadeSession;
