//! Story actor message types.

use tokio::sync::oneshot;
use uuid::Uuid;

use super::{
    errors::StoryResult,
    models::{ReactionKind, Story, StoryDraft, StoryInsights, StoryReaction, StoryUser},
};

/// Messages that can be sent to a StoryActor
#[derive(Debug)]
pub enum StoryMessage {
    /// Publish a new story
    Create {
        draft: StoryDraft,
        response: oneshot::Sender<StoryResult<Story>>,
    },

    /// Record that a user viewed a story
    View {
        story_id: Uuid,
        viewer: StoryUser,
        is_following: bool,
        response: oneshot::Sender<StoryResult<u32>>,
    },

    /// React to a story
    React {
        story_id: Uuid,
        user: StoryUser,
        kind: ReactionKind,
        response: oneshot::Sender<StoryResult<StoryReaction>>,
    },

    /// Flip the current user's like
    ToggleLike {
        story_id: Uuid,
        response: oneshot::Sender<StoryResult<bool>>,
    },

    Insights {
        story_id: Uuid,
        response: oneshot::Sender<StoryResult<StoryInsights>>,
    },

    /// Active stories, newest first
    List {
        response: oneshot::Sender<Vec<Story>>,
    },

    /// IDs removed by sweeps so far
    Expired {
        response: oneshot::Sender<Vec<Uuid>>,
    },

    /// Run a sweep now instead of waiting for the next tick
    Sweep {
        response: oneshot::Sender<Vec<Uuid>>,
    },

    /// Stop the actor
    Shutdown,
}
