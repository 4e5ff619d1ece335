//! Arcade data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::chat::{ChatPin, ChatThread};

/// Candidate ID type
pub type CandidateId = String;

/// Match ID type
pub type MatchId = Uuid;

/// A prospective match shown in the discovery pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub age: u8,
    pub bio: String,
    pub location: String,
    pub photos: Vec<String>,
    pub distance_km: u32,
    pub interests: BTreeSet<String>,
    pub verified: bool,
    pub occupation: Option<String>,
}

/// Swipe action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    Like,
    Dislike,
    SuperLike,
    Pass,
}

impl SwipeAction {
    /// Whether this action can produce a match
    pub fn is_positive(self) -> bool {
        matches!(self, SwipeAction::Like | SwipeAction::SuperLike)
    }
}

impl std::fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwipeAction::Like => write!(f, "like"),
            SwipeAction::Dislike => write!(f, "dislike"),
            SwipeAction::SuperLike => write!(f, "super_like"),
            SwipeAction::Pass => write!(f, "pass"),
        }
    }
}

/// One entry of the append-only interaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeDecision {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub action: SwipeAction,
    pub decided_at: DateTime<Utc>,
}

/// A mutual positive signal; owns the PIN-gated chat thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub candidate: Candidate,
    pub matched_at: DateTime<Utc>,
    pub chat_pin: ChatPin,
    pub thread: ChatThread,
}

/// Result of a single swipe
#[derive(Debug, Clone)]
pub struct SwipeOutcome {
    pub decision: SwipeDecision,
    /// Set when the match draw succeeded
    pub matched: Option<MatchId>,
}

impl SwipeOutcome {
    pub fn is_match(&self) -> bool {
        self.matched.is_some()
    }
}

/// A user the current user has blocked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedUser {
    pub id: CandidateId,
    pub name: String,
    pub blocked_at: DateTime<Utc>,
}

/// Report category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Inappropriate,
    Spam,
    Harassment,
    FakeProfile,
    Other,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Inappropriate => write!(f, "inappropriate"),
            ReportType::Spam => write!(f, "spam"),
            ReportType::Harassment => write!(f, "harassment"),
            ReportType::FakeProfile => write!(f, "fake_profile"),
            ReportType::Other => write!(f, "other"),
        }
    }
}

/// User report submitted from a profile or chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub reported_user_id: CandidateId,
    pub report_type: ReportType,
    pub reason: String,
    pub evidence: Option<String>,
}

/// Report review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
}

/// Acknowledgment for a submitted report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAck {
    pub report_id: Uuid,
    pub status: ReportStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Swipe and match totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcadeStats {
    pub total_likes: usize,
    pub total_dislikes: usize,
    pub total_super_likes: usize,
    pub total_passes: usize,
    pub total_matches: usize,
}
