//! Ephemeral stories.
//!
//! A story is visible for a fixed horizon after creation (24 hours by
//! default). [`StoryEngine`] holds the active list and removes expired stories
//! on [`StoryEngine::sweep`]; [`StoryActor`] owns an engine on a tokio task and
//! sweeps it on a fixed interval.

pub mod actor;
pub mod display;
pub mod engine;
pub mod errors;
pub mod messages;
pub mod models;

pub use actor::{StoryActor, StoryHandle};
pub use display::{format_time_ago, progress_percent, time_remaining};
pub use engine::StoryEngine;
pub use errors::{StoryError, StoryResult};
pub use messages::StoryMessage;
pub use models::{
    ReactionKind, Sticker, Story, StoryDraft, StoryInsights, StoryReaction, StoryUser,
    StoryViewer, TextOverlay,
};
