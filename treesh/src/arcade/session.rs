//! One user's arcade session: discovery engine plus chat gate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{
    engine::DiscoveryEngine,
    errors::ArcadeResult,
    models::{
        ArcadeStats, BlockedUser, Candidate, MatchId, Report, ReportAck, SwipeAction, SwipeOutcome,
    },
};
use crate::{
    chat::{ChatError, ChatGate, ChatMessage, ChatSummary, ChatThread, GateState},
    config::EngineConfig,
    random::RandomSource,
};

/// Facade that keeps the engine and the gate consistent.
///
/// Blocking a user also discards any open view, pending replies and failed
/// attempts of their threads; resetting a PIN relocks the thread.
#[derive(Debug)]
pub struct ArcadeSession {
    engine: DiscoveryEngine,
    gate: ChatGate,
}

impl ArcadeSession {
    #[must_use]
    pub fn new(pool: Vec<Candidate>, config: &EngineConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            engine: DiscoveryEngine::new(pool, config.arcade.clone(), rng),
            gate: ChatGate::new(config.chat.clone(), config.pin_attempts.clone()),
        }
    }

    pub fn engine(&self) -> &DiscoveryEngine {
        &self.engine
    }

    pub fn gate(&self) -> &ChatGate {
        &self.gate
    }

    pub fn decide(
        &mut self,
        candidate_id: &str,
        action: SwipeAction,
        now: DateTime<Utc>,
    ) -> ArcadeResult<SwipeOutcome> {
        self.engine.decide(candidate_id, action, now)
    }

    pub fn reset_swipe_history(&mut self) {
        self.engine.reset_swipe_history();
    }

    pub fn stats(&self) -> ArcadeStats {
        self.engine.stats()
    }

    pub fn chats(&self) -> Vec<ChatSummary> {
        self.engine.chat_summaries()
    }

    /// Open a match's thread view in the locked state
    pub fn open_chat(&mut self, match_id: MatchId) -> ArcadeResult<GateState> {
        self.engine.find_match(match_id)?;
        Ok(self.gate.open(match_id))
    }

    pub fn close_chat(&mut self) {
        self.gate.close();
    }

    pub fn submit_pin(
        &mut self,
        match_id: MatchId,
        pin: &str,
        now: DateTime<Utc>,
    ) -> ArcadeResult<GateState> {
        let chat_match = self.engine.find_match(match_id)?;
        Ok(self.gate.submit_pin(chat_match, pin, now)?)
    }

    /// Messages of an unlocked thread
    pub fn thread(&self, match_id: MatchId) -> ArcadeResult<&ChatThread> {
        let chat_match = self.engine.find_match(match_id)?;
        if !self.gate.is_unlocked(match_id) {
            return Err(ChatError::Locked(match_id).into());
        }
        Ok(&chat_match.thread)
    }

    pub fn send_message(
        &mut self,
        match_id: MatchId,
        text: &str,
        now: DateTime<Utc>,
    ) -> ArcadeResult<ChatMessage> {
        let chat_match = self.engine.find_match_mut(match_id)?;
        Ok(self.gate.send_message(chat_match, text, now)?)
    }

    /// Deliver synthetic replies that are due; returns how many arrived
    pub fn deliver_due_replies(&mut self, now: DateTime<Utc>) -> usize {
        self.gate.deliver_due_replies(self.engine.matches_mut(), now)
    }

    pub fn next_reply_due(&self) -> Option<DateTime<Utc>> {
        self.gate.next_reply_due()
    }

    pub fn mark_read(&mut self, match_id: MatchId) -> ArcadeResult<()> {
        let chat_match = self.engine.find_match_mut(match_id)?;
        Ok(self.gate.mark_read(chat_match)?)
    }

    pub fn pin_message(&mut self, match_id: MatchId, message_id: Uuid) -> ArcadeResult<()> {
        let chat_match = self.engine.find_match_mut(match_id)?;
        Ok(self.gate.pin_message(chat_match, message_id)?)
    }

    /// Draw a new PIN for a thread and relock it. Returns the new PIN digits.
    pub fn reset_pin(&mut self, match_id: MatchId) -> ArcadeResult<String> {
        let pin = self.engine.regenerate_pin(match_id)?.as_str().to_string();
        self.gate.relock(match_id);
        Ok(pin)
    }

    /// Leave an unlocked chat: the match and its thread are removed and the
    /// view closes.
    pub fn leave_chat(&mut self, match_id: MatchId) -> ArcadeResult<()> {
        self.engine.find_match(match_id)?;
        if !self.gate.is_unlocked(match_id) {
            return Err(ChatError::Locked(match_id).into());
        }
        self.engine.remove_match(match_id)?;
        self.gate.forget(match_id);
        Ok(())
    }

    pub fn block_user(&mut self, candidate_id: &str, now: DateTime<Utc>) -> ArcadeResult<()> {
        for match_id in self.engine.block(candidate_id, now)? {
            self.gate.forget(match_id);
        }
        Ok(())
    }

    pub fn unblock_user(&mut self, candidate_id: &str) -> ArcadeResult<BlockedUser> {
        self.engine.unblock(candidate_id)
    }

    pub fn report_user(&self, report: &Report, now: DateTime<Utc>) -> ArcadeResult<ReportAck> {
        self.engine.report(report, now)
    }
}
