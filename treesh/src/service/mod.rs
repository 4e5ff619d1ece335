//! Asynchronous data service seam.
//!
//! [`DataService`] is what a client talks to. [`DemoService`] implements it in
//! memory on top of the engines, with simulated latency on every call; a real
//! network client would implement the same trait.

pub mod demo;
pub mod errors;
pub mod latency;
pub mod seed;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    arcade::{
        ArcadeStats, BlockedUser, Candidate, DiscoveryFilters, MatchId, Report, ReportAck,
        SwipeDecision,
    },
    chat::{ChatMessage, ChatSummary, ChatThread},
    settings::{SettingsUpdate, UserSettings},
};

pub use demo::{DemoService, DemoServiceBuilder};
pub use errors::{ServiceError, ServiceResult};
pub use latency::SimulatedLatency;
pub use seed::demo_candidates;

/// Result of a swipe call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeResponse {
    pub matched: bool,
    pub match_id: Option<MatchId>,
}

/// Client-facing operations of the arcade, chat and settings screens
#[async_trait]
pub trait DataService: Send + Sync {
    /// Candidates still available for swiping that pass the stored preferences
    async fn potential_matches(&self) -> ServiceResult<Vec<Candidate>>;

    async fn preferences(&self) -> ServiceResult<DiscoveryFilters>;

    /// Replace the discovery preferences used by [`DataService::potential_matches`]
    async fn update_preferences(
        &self,
        preferences: DiscoveryFilters,
    ) -> ServiceResult<DiscoveryFilters>;

    async fn like(&self, candidate_id: &str) -> ServiceResult<SwipeResponse>;

    async fn super_like(&self, candidate_id: &str) -> ServiceResult<SwipeResponse>;

    async fn dislike(&self, candidate_id: &str) -> ServiceResult<SwipeResponse>;

    async fn pass(&self, candidate_id: &str) -> ServiceResult<SwipeResponse>;

    /// Interaction log, newest first
    async fn interactions(&self) -> ServiceResult<Vec<SwipeDecision>>;

    async fn stats(&self) -> ServiceResult<ArcadeStats>;

    /// Restore every candidate and clear the interaction log
    async fn reset_swipe_history(&self) -> ServiceResult<()>;

    async fn block_user(&self, candidate_id: &str) -> ServiceResult<()>;

    async fn unblock_user(&self, candidate_id: &str) -> ServiceResult<()>;

    async fn blocked_users(&self) -> ServiceResult<Vec<BlockedUser>>;

    async fn report_user(&self, report: Report) -> ServiceResult<ReportAck>;

    /// Chat list; never reveals message content beyond the last message
    async fn chats(&self) -> ServiceResult<Vec<ChatSummary>>;

    /// Full thread, fails on a wrong PIN
    async fn chat(&self, match_id: MatchId, pin: &str) -> ServiceResult<ChatThread>;

    async fn send_message(
        &self,
        match_id: MatchId,
        text: &str,
        pin: &str,
    ) -> ServiceResult<ChatMessage>;

    async fn mark_read(&self, match_id: MatchId, pin: &str) -> ServiceResult<()>;

    /// Remove a chat and its match after a PIN check
    async fn leave_chat(&self, match_id: MatchId, pin: &str) -> ServiceResult<()>;

    async fn pin_message(&self, match_id: MatchId, message_id: Uuid, pin: &str)
    -> ServiceResult<()>;

    /// The current user's copy of a thread's PIN
    async fn chat_pin(&self, match_id: MatchId) -> ServiceResult<String>;

    /// Replace a thread's PIN; returns the new one
    async fn reset_chat_pin(&self, match_id: MatchId) -> ServiceResult<String>;

    async fn settings(&self) -> ServiceResult<UserSettings>;

    async fn update_settings(&self, update: SettingsUpdate) -> ServiceResult<UserSettings>;

    async fn reset_settings(&self) -> ServiceResult<UserSettings>;

    /// Pretty JSON snapshot of the settings
    async fn export_settings(&self) -> ServiceResult<String>;
}
