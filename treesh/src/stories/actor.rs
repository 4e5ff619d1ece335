//! Story actor: the single owner of a [`StoryEngine`].
//!
//! All mutation goes through the inbox, and the periodic sweep runs on the same
//! task, so a story created between ticks can never be lost to a sweep.

use std::sync::Arc;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Duration, MissedTickBehavior, interval},
};
use uuid::Uuid;

use super::{
    engine::StoryEngine,
    errors::{StoryError, StoryResult},
    messages::StoryMessage,
    models::{
        ReactionKind, Story, StoryDraft, StoryInsights, StoryReaction, StoryUser, StoryViewer,
    },
};
use crate::{
    clock::Clock,
    config::{ConfigError, StoryConfig},
};

/// Handle for sending messages to a running story actor
#[derive(Clone)]
pub struct StoryHandle {
    sender: mpsc::Sender<StoryMessage>,
}

impl StoryHandle {
    /// Send a raw message to the actor
    pub async fn send(&self, message: StoryMessage) -> StoryResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| StoryError::Closed)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> StoryMessage,
    ) -> StoryResult<T> {
        let (tx, rx) = oneshot::channel();
        self.send(build(tx)).await?;
        rx.await.map_err(|_| StoryError::Closed)
    }

    pub async fn create(&self, draft: StoryDraft) -> StoryResult<Story> {
        self.request(|response| StoryMessage::Create { draft, response })
            .await?
    }

    pub async fn view(
        &self,
        story_id: Uuid,
        viewer: StoryUser,
        is_following: bool,
    ) -> StoryResult<u32> {
        self.request(|response| StoryMessage::View {
            story_id,
            viewer,
            is_following,
            response,
        })
        .await?
    }

    pub async fn react(
        &self,
        story_id: Uuid,
        user: StoryUser,
        kind: ReactionKind,
    ) -> StoryResult<StoryReaction> {
        self.request(|response| StoryMessage::React {
            story_id,
            user,
            kind,
            response,
        })
        .await?
    }

    pub async fn toggle_like(&self, story_id: Uuid) -> StoryResult<bool> {
        self.request(|response| StoryMessage::ToggleLike { story_id, response })
            .await?
    }

    pub async fn insights(&self, story_id: Uuid) -> StoryResult<StoryInsights> {
        self.request(|response| StoryMessage::Insights { story_id, response })
            .await?
    }

    pub async fn list(&self) -> StoryResult<Vec<Story>> {
        self.request(|response| StoryMessage::List { response }).await
    }

    pub async fn expired(&self) -> StoryResult<Vec<Uuid>> {
        self.request(|response| StoryMessage::Expired { response })
            .await
    }

    pub async fn sweep(&self) -> StoryResult<Vec<Uuid>> {
        self.request(|response| StoryMessage::Sweep { response })
            .await
    }

    pub async fn shutdown(&self) -> StoryResult<()> {
        self.send(StoryMessage::Shutdown).await
    }
}

/// Story actor owning the engine
pub struct StoryActor {
    engine: StoryEngine,
    inbox: mpsc::Receiver<StoryMessage>,
    clock: Arc<dyn Clock>,
    sweep_interval: Duration,
}

impl StoryActor {
    /// Create a new story actor
    ///
    /// # Returns
    ///
    /// * `(StoryActor, StoryHandle)` - Actor and handle for sending messages
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when the story TTL is out of range
    pub fn new(
        config: &StoryConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<(Self, StoryHandle), ConfigError> {
        Ok(Self::with_engine(StoryEngine::new(config)?, config, clock))
    }

    /// Create an actor around an engine that already holds stories
    pub fn with_engine(
        engine: StoryEngine,
        config: &StoryConfig,
        clock: Arc<dyn Clock>,
    ) -> (Self, StoryHandle) {
        let (sender, inbox) = mpsc::channel(100);
        let actor = Self {
            engine,
            inbox,
            clock,
            sweep_interval: Duration::from_secs(config.sweep_interval_secs.max(1)),
        };
        (actor, StoryHandle { sender })
    }

    /// Spawn the actor on the current runtime and return its handle
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when the story TTL is out of range
    pub fn spawn(config: &StoryConfig, clock: Arc<dyn Clock>) -> Result<StoryHandle, ConfigError> {
        let (actor, handle) = Self::new(config, clock)?;
        tokio::spawn(actor.run());
        Ok(handle)
    }

    /// Run the actor event loop until shutdown or every handle is dropped
    pub async fn run(mut self) {
        log::info!(
            "Story actor starting (sweep every {:?})",
            self.sweep_interval
        );

        let mut sweep_interval = interval(self.sweep_interval);
        sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                message = self.inbox.recv() => {
                    match message {
                        Some(StoryMessage::Shutdown) | None => break,
                        Some(message) => self.handle_message(message),
                    }
                }

                _ = sweep_interval.tick() => {
                    self.engine.sweep(self.clock.now());
                }
            }
        }

        log::info!("Story actor stopped");
    }

    fn handle_message(&mut self, message: StoryMessage) {
        let now = self.clock.now();
        match message {
            StoryMessage::Create { draft, response } => {
                let _ = response.send(self.engine.create_story(draft, now));
            }

            StoryMessage::View {
                story_id,
                viewer,
                is_following,
                response,
            } => {
                let viewer = StoryViewer {
                    user: viewer,
                    viewed_at: now,
                    is_following,
                };
                let _ = response.send(self.engine.record_view(story_id, viewer));
            }

            StoryMessage::React {
                story_id,
                user,
                kind,
                response,
            } => {
                let _ = response.send(self.engine.record_reaction(story_id, user, kind, now));
            }

            StoryMessage::ToggleLike { story_id, response } => {
                let _ = response.send(self.engine.toggle_like(story_id, now));
            }

            StoryMessage::Insights { story_id, response } => {
                let _ = response.send(self.engine.insights(story_id));
            }

            StoryMessage::List { response } => {
                let _ = response.send(self.engine.stories().to_vec());
            }

            StoryMessage::Expired { response } => {
                let _ = response.send(self.engine.expired_ids().to_vec());
            }

            StoryMessage::Sweep { response } => {
                let _ = response.send(self.engine.sweep(now));
            }

            StoryMessage::Shutdown => {}
        }
    }
}
