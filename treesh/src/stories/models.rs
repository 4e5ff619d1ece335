//! Story data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Positioned text drawn over the story media
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub color: String,
    pub font_family: String,
}

/// Positioned emoji sticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    pub emoji: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Public identity attached to a view or reaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryUser {
    pub id: String,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryViewer {
    pub user: StoryUser,
    pub viewed_at: DateTime<Utc>,
    pub is_following: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Heart,
    Laugh,
    Wow,
    Sad,
    Angry,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 6] = [
        ReactionKind::Like,
        ReactionKind::Heart,
        ReactionKind::Laugh,
        ReactionKind::Wow,
        ReactionKind::Sad,
        ReactionKind::Angry,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            ReactionKind::Like => "👍",
            ReactionKind::Heart => "❤️",
            ReactionKind::Laugh => "😂",
            ReactionKind::Wow => "😮",
            ReactionKind::Sad => "😢",
            ReactionKind::Angry => "😠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryReaction {
    pub id: Uuid,
    pub kind: ReactionKind,
    pub user: StoryUser,
    pub reacted_at: DateTime<Utc>,
}

/// An ephemeral story. Visible while `now < expires_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: Uuid,
    pub media: String,
    pub text_overlays: Vec<TextOverlay>,
    pub stickers: Vec<Sticker>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub views: u32,
    pub likes: u32,
    /// Whether the current user has liked it
    pub liked: bool,
    pub viewers: Vec<StoryViewer>,
    pub reactions: Vec<StoryReaction>,
}

impl Story {
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Input for a new story
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryDraft {
    pub media: String,
    pub text_overlays: Vec<TextOverlay>,
    pub stickers: Vec<Sticker>,
}

impl StoryDraft {
    pub fn new(media: impl Into<String>) -> Self {
        Self {
            media: media.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, overlay: TextOverlay) -> Self {
        self.text_overlays.push(overlay);
        self
    }

    #[must_use]
    pub fn with_sticker(mut self, sticker: Sticker) -> Self {
        self.stickers.push(sticker);
        self
    }
}

/// Engagement summary for a story's author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryInsights {
    pub views: u32,
    pub likes: u32,
    pub viewers: usize,
    pub followers_viewing: usize,
    pub reactions: BTreeMap<ReactionKind, usize>,
}
