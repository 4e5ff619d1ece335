//! Ephemeral story store with expiry sweeps.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::{
    errors::{StoryError, StoryResult},
    models::{
        ReactionKind, Story, StoryDraft, StoryInsights, StoryReaction, StoryUser, StoryViewer,
    },
};
use crate::config::{ConfigError, StoryConfig};

/// Active stories (newest first) and the IDs of those already swept.
#[derive(Debug, Clone)]
pub struct StoryEngine {
    ttl: Duration,
    stories: Vec<Story>,
    expired: Vec<Uuid>,
}

impl StoryEngine {
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when the TTL is out of range
    pub fn new(config: &StoryConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            ttl: config.ttl()?,
            stories: Vec::new(),
            expired: Vec::new(),
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Validate a draft and publish it at the head of the list
    ///
    /// # Errors
    ///
    /// * `StoryError::InvalidDraft` - empty media or non-finite placement
    pub fn create_story(&mut self, draft: StoryDraft, now: DateTime<Utc>) -> StoryResult<Story> {
        validate_draft(&draft)?;

        let story = Story {
            id: Uuid::new_v4(),
            media: draft.media,
            text_overlays: draft.text_overlays,
            stickers: draft.stickers,
            created_at: now,
            expires_at: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            views: 0,
            likes: 0,
            liked: false,
            viewers: Vec::new(),
            reactions: Vec::new(),
        };
        log::debug!("Story {} published until {}", story.id, story.expires_at);

        self.stories.insert(0, story.clone());
        Ok(story)
    }

    /// Insert an already built story, e.g. seed data. Keeps newest-first order.
    pub fn restore(&mut self, story: Story) {
        let index = self
            .stories
            .iter()
            .position(|s| s.created_at <= story.created_at)
            .unwrap_or(self.stories.len());
        self.stories.insert(index, story);
    }

    /// Remove every story with `expires_at <= now`, returning their IDs
    pub fn sweep(&mut self, now: DateTime<Utc>) -> Vec<Uuid> {
        let (expired, active): (Vec<Story>, Vec<Story>) = std::mem::take(&mut self.stories)
            .into_iter()
            .partition(|story| !story.is_visible(now));
        self.stories = active;

        let ids: Vec<Uuid> = expired.into_iter().map(|story| story.id).collect();
        if !ids.is_empty() {
            log::info!("Expired {} stories", ids.len());
            self.expired.extend_from_slice(&ids);
        }
        ids
    }

    /// Active stories, newest first
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Stories still visible at `now`, without waiting for a sweep
    pub fn visible(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Story> {
        self.stories.iter().filter(move |story| story.is_visible(now))
    }

    /// IDs of swept stories, in sweep order
    pub fn expired_ids(&self) -> &[Uuid] {
        &self.expired
    }

    pub fn get(&self, story_id: Uuid) -> StoryResult<&Story> {
        self.stories
            .iter()
            .find(|s| s.id == story_id)
            .ok_or(StoryError::NotFound(story_id))
    }

    /// Record a view; returns the new view count
    pub fn record_view(&mut self, story_id: Uuid, viewer: StoryViewer) -> StoryResult<u32> {
        let story = self.visible_mut(story_id, viewer.viewed_at)?;
        story.viewers.push(viewer);
        story.views += 1;
        Ok(story.views)
    }

    pub fn record_reaction(
        &mut self,
        story_id: Uuid,
        user: StoryUser,
        kind: ReactionKind,
        now: DateTime<Utc>,
    ) -> StoryResult<StoryReaction> {
        let story = self.visible_mut(story_id, now)?;
        let reaction = StoryReaction {
            id: Uuid::new_v4(),
            kind,
            user,
            reacted_at: now,
        };
        story.reactions.push(reaction.clone());
        Ok(reaction)
    }

    /// Flip the current user's like; returns whether the story is now liked
    pub fn toggle_like(&mut self, story_id: Uuid, now: DateTime<Utc>) -> StoryResult<bool> {
        let story = self.visible_mut(story_id, now)?;
        story.liked = !story.liked;
        if story.liked {
            story.likes += 1;
        } else {
            story.likes = story.likes.saturating_sub(1);
        }
        Ok(story.liked)
    }

    pub fn insights(&self, story_id: Uuid) -> StoryResult<StoryInsights> {
        let story = self.get(story_id)?;

        let mut reactions = BTreeMap::new();
        for reaction in &story.reactions {
            *reactions.entry(reaction.kind).or_insert(0) += 1;
        }

        Ok(StoryInsights {
            views: story.views,
            likes: story.likes,
            viewers: story.viewers.len(),
            followers_viewing: story.viewers.iter().filter(|v| v.is_following).count(),
            reactions,
        })
    }

    fn visible_mut(&mut self, story_id: Uuid, now: DateTime<Utc>) -> StoryResult<&mut Story> {
        let story = self
            .stories
            .iter_mut()
            .find(|s| s.id == story_id)
            .ok_or(StoryError::NotFound(story_id))?;
        if !story.is_visible(now) {
            return Err(StoryError::Expired(story_id));
        }
        Ok(story)
    }
}

fn validate_draft(draft: &StoryDraft) -> StoryResult<()> {
    if draft.media.trim().is_empty() {
        return Err(StoryError::InvalidDraft("media is required".to_string()));
    }
    for overlay in &draft.text_overlays {
        if !(overlay.x.is_finite() && overlay.y.is_finite() && overlay.font_size.is_finite()) {
            return Err(StoryError::InvalidDraft(format!(
                "text overlay '{}' has an invalid position",
                overlay.text
            )));
        }
    }
    for sticker in &draft.stickers {
        if !(sticker.x.is_finite() && sticker.y.is_finite() && sticker.size.is_finite()) {
            return Err(StoryError::InvalidDraft(format!(
                "sticker {} has an invalid position",
                sticker.emoji
            )));
        }
    }
    Ok(())
}
