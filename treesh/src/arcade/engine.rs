//! Discovery engine: candidate pool, swipe decisions and match draws.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{
    errors::{ArcadeError, ArcadeResult},
    filters::{DiscoveryFilters, filter_candidates},
    models::{
        ArcadeStats, BlockedUser, Candidate, Match, MatchId, Report, ReportAck, ReportStatus,
        SwipeAction, SwipeDecision, SwipeOutcome,
    },
};
use crate::{
    chat::{ChatPin, ChatSummary, ChatThread},
    config::ArcadeConfig,
    random::RandomSource,
};

/// Owned store for one user's discovery session.
///
/// Candidates leave the active pool once decided on and only come back through
/// [`DiscoveryEngine::reset_swipe_history`]. Every positive decision consumes
/// exactly one draw from the random source.
pub struct DiscoveryEngine {
    config: ArcadeConfig,
    original_pool: Vec<Candidate>,
    pool: Vec<Candidate>,
    /// Newest first
    interactions: Vec<SwipeDecision>,
    /// Newest first
    matches: Vec<Match>,
    blocked: Vec<BlockedUser>,
    rng: Box<dyn RandomSource>,
}

impl std::fmt::Debug for DiscoveryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryEngine")
            .field("pool", &self.pool.len())
            .field("interactions", &self.interactions.len())
            .field("matches", &self.matches.len())
            .field("blocked", &self.blocked.len())
            .finish_non_exhaustive()
    }
}

impl DiscoveryEngine {
    #[must_use]
    pub fn new(
        pool: Vec<Candidate>,
        config: ArcadeConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            original_pool: pool.clone(),
            pool,
            interactions: Vec::new(),
            matches: Vec::new(),
            blocked: Vec::new(),
            rng,
        }
    }

    /// Active pool in original order, including blocked entries restored by a reset
    pub fn pool(&self) -> &[Candidate] {
        &self.pool
    }

    /// Active candidates that are not blocked
    pub fn visible_candidates(&self) -> Vec<&Candidate> {
        self.pool.iter().filter(|c| !self.is_blocked(&c.id)).collect()
    }

    /// Visible candidates passing `filters`
    ///
    /// # Errors
    ///
    /// * `ArcadeError::InvalidFilters` - inverted age range
    pub fn filtered_candidates(&self, filters: &DiscoveryFilters) -> ArcadeResult<Vec<&Candidate>> {
        filters.validate()?;
        Ok(filter_candidates(&self.pool, filters)
            .into_iter()
            .filter(|c| !self.is_blocked(&c.id))
            .collect())
    }

    /// The candidate to show next, `None` once the pool is exhausted
    pub fn next_candidate(&self) -> Option<&Candidate> {
        self.pool.iter().find(|c| !self.is_blocked(&c.id))
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_candidate().is_none()
    }

    /// Record a decision on an active candidate and draw for a match when positive.
    ///
    /// # Errors
    ///
    /// * `ArcadeError::CandidateNotFound` - unknown, already decided or blocked;
    ///   nothing changes
    pub fn decide(
        &mut self,
        candidate_id: &str,
        action: SwipeAction,
        now: DateTime<Utc>,
    ) -> ArcadeResult<SwipeOutcome> {
        if self.is_blocked(candidate_id) {
            return Err(ArcadeError::CandidateNotFound(candidate_id.to_string()));
        }
        let index = self
            .pool
            .iter()
            .position(|c| c.id == candidate_id)
            .ok_or_else(|| ArcadeError::CandidateNotFound(candidate_id.to_string()))?;

        let candidate = self.pool.remove(index);
        let decision = SwipeDecision {
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            action,
            decided_at: now,
        };
        self.interactions.insert(0, decision.clone());
        log::debug!("Decided {} on candidate {}", action, candidate.id);

        let matched = if action.is_positive() && self.draw_match(action) {
            Some(self.create_match(candidate, now))
        } else {
            None
        };

        Ok(SwipeOutcome { decision, matched })
    }

    fn draw_match(&mut self, action: SwipeAction) -> bool {
        let probability = match action {
            SwipeAction::SuperLike => self.config.super_like_match_probability,
            _ => self.config.like_match_probability,
        };
        self.rng.next_unit() < probability
    }

    fn create_match(&mut self, candidate: Candidate, now: DateTime<Utc>) -> MatchId {
        let chat_pin = ChatPin::generate(self.rng.as_mut());
        let thread = ChatThread::seeded(format!("You matched with {}!", candidate.name), now);
        let new_match = Match {
            id: Uuid::new_v4(),
            candidate,
            matched_at: now,
            chat_pin,
            thread,
        };
        let id = new_match.id;

        log::info!("Matched with {} ({})", new_match.candidate.name, id);
        self.matches.insert(0, new_match);
        id
    }

    /// Clear all decisions and restore the original pool. Matches and blocks stay.
    pub fn reset_swipe_history(&mut self) {
        self.interactions.clear();
        self.pool = self.original_pool.clone();
        log::info!("Swipe history reset: {} candidates restored", self.pool.len());
    }

    /// Interaction log, newest first
    pub fn interactions(&self) -> &[SwipeDecision] {
        &self.interactions
    }

    /// Matches, newest first
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub(crate) fn matches_mut(&mut self) -> &mut [Match] {
        &mut self.matches
    }

    pub fn find_match(&self, match_id: MatchId) -> ArcadeResult<&Match> {
        self.matches
            .iter()
            .find(|m| m.id == match_id)
            .ok_or(ArcadeError::MatchNotFound(match_id))
    }

    pub(crate) fn find_match_mut(&mut self, match_id: MatchId) -> ArcadeResult<&mut Match> {
        self.matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(ArcadeError::MatchNotFound(match_id))
    }

    /// Chat list entries for every match
    pub fn chat_summaries(&self) -> Vec<ChatSummary> {
        self.matches
            .iter()
            .map(|m| {
                let last = m.thread.last_message();
                ChatSummary {
                    match_id: m.id,
                    candidate_name: m.candidate.name.clone(),
                    last_message: last.map(|msg| msg.text.clone()),
                    last_message_at: last.map(|msg| msg.sent_at),
                    unread_count: m.thread.unread_count(),
                }
            })
            .collect()
    }

    /// Replace a match's chat PIN with a freshly drawn one
    ///
    /// # Errors
    ///
    /// * `ArcadeError::MatchNotFound` - no such match
    pub fn regenerate_pin(&mut self, match_id: MatchId) -> ArcadeResult<&ChatPin> {
        let index = self
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or(ArcadeError::MatchNotFound(match_id))?;
        let pin = ChatPin::generate(self.rng.as_mut());
        self.matches[index].chat_pin = pin;
        log::info!("Chat PIN reset for match {}", match_id);
        Ok(&self.matches[index].chat_pin)
    }

    /// Drop a match and its thread. The candidate stays decided on.
    ///
    /// # Errors
    ///
    /// * `ArcadeError::MatchNotFound` - no such match
    pub fn remove_match(&mut self, match_id: MatchId) -> ArcadeResult<Match> {
        let index = self
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or(ArcadeError::MatchNotFound(match_id))?;
        log::info!("Left chat for match {}", match_id);
        Ok(self.matches.remove(index))
    }

    pub fn is_blocked(&self, candidate_id: &str) -> bool {
        self.blocked.iter().any(|b| b.id == candidate_id)
    }

    pub fn blocked(&self) -> &[BlockedUser] {
        &self.blocked
    }

    /// Block a user: drop their matches, remove them from the pool and record them.
    ///
    /// Returns the IDs of the removed matches so open chat state can be discarded.
    /// Blocking an already blocked user changes nothing.
    ///
    /// # Errors
    ///
    /// * `ArcadeError::CandidateNotFound` - the user was never in the pool
    pub fn block(&mut self, candidate_id: &str, now: DateTime<Utc>) -> ArcadeResult<Vec<MatchId>> {
        if self.is_blocked(candidate_id) {
            return Ok(Vec::new());
        }

        let name = self
            .original_pool
            .iter()
            .chain(self.matches.iter().map(|m| &m.candidate))
            .find(|c| c.id == candidate_id)
            .map(|c| c.name.clone())
            .ok_or_else(|| ArcadeError::CandidateNotFound(candidate_id.to_string()))?;

        let removed: Vec<MatchId> = self
            .matches
            .iter()
            .filter(|m| m.candidate.id == candidate_id)
            .map(|m| m.id)
            .collect();
        self.matches.retain(|m| m.candidate.id != candidate_id);
        self.pool.retain(|c| c.id != candidate_id);

        self.blocked.push(BlockedUser {
            id: candidate_id.to_string(),
            name,
            blocked_at: now,
        });
        log::info!(
            "Blocked user {} ({} matches removed)",
            candidate_id,
            removed.len()
        );

        Ok(removed)
    }

    /// Remove a user from the blocked list
    ///
    /// # Errors
    ///
    /// * `ArcadeError::NotBlocked` - the user is not blocked
    pub fn unblock(&mut self, candidate_id: &str) -> ArcadeResult<BlockedUser> {
        let index = self
            .blocked
            .iter()
            .position(|b| b.id == candidate_id)
            .ok_or_else(|| ArcadeError::NotBlocked(candidate_id.to_string()))?;
        log::info!("Unblocked user {}", candidate_id);
        Ok(self.blocked.remove(index))
    }

    /// Acknowledge a report. Reports are not queued anywhere.
    ///
    /// # Errors
    ///
    /// * `ArcadeError::EmptyReportReason` - blank reason
    pub fn report(&self, report: &Report, now: DateTime<Utc>) -> ArcadeResult<ReportAck> {
        if report.reason.trim().is_empty() {
            return Err(ArcadeError::EmptyReportReason);
        }
        let ack = ReportAck {
            report_id: Uuid::new_v4(),
            status: ReportStatus::Pending,
            submitted_at: now,
        };
        log::info!(
            "Report {} filed against {} ({})",
            ack.report_id,
            report.reported_user_id,
            report.report_type
        );
        Ok(ack)
    }

    pub fn stats(&self) -> ArcadeStats {
        let mut stats = ArcadeStats {
            total_matches: self.matches.len(),
            ..ArcadeStats::default()
        };
        for decision in &self.interactions {
            match decision.action {
                SwipeAction::Like => stats.total_likes += 1,
                SwipeAction::Dislike => stats.total_dislikes += 1,
                SwipeAction::SuperLike => stats.total_super_likes += 1,
                SwipeAction::Pass => stats.total_passes += 1,
            }
        }
        stats
    }
}
