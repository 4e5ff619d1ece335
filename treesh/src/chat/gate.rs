//! PIN-gated access to match chat threads.
//!
//! The gate tracks the single thread view that is currently open. Opening a
//! thread always starts `Locked`; a correct PIN unlocks it until the view is
//! closed or another thread is opened. Nothing about the unlock is persisted.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{
    errors::{ChatError, ChatResult},
    models::{ChatMessage, ChatPin, MessageSender},
};
use crate::{
    arcade::Match,
    config::ChatConfig,
    security::{RateLimitConfig, RateLimitResult, RateLimiter},
};

/// Access state of a thread view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, Copy)]
struct OpenThread {
    match_id: Uuid,
    state: GateState,
}

/// Synthetic counterpart reply waiting for its delivery time
#[derive(Debug, Clone)]
struct PendingReply {
    match_id: Uuid,
    due_at: DateTime<Utc>,
}

/// Chat access gate
#[derive(Debug)]
pub struct ChatGate {
    config: ChatConfig,
    limiter: RateLimiter,
    open: Option<OpenThread>,
    pending: Vec<PendingReply>,
}

impl ChatGate {
    #[must_use]
    pub fn new(config: ChatConfig, pin_attempts: RateLimitConfig) -> Self {
        Self {
            config,
            limiter: RateLimiter::new(pin_attempts),
            open: None,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Open a thread view. Always starts locked, even when re-opening.
    pub fn open(&mut self, match_id: Uuid) -> GateState {
        self.open = Some(OpenThread {
            match_id,
            state: GateState::Locked,
        });
        GateState::Locked
    }

    /// Close the current thread view
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Close the view if it shows `match_id`. Returns whether it was open.
    pub fn close_if_open(&mut self, match_id: Uuid) -> bool {
        if self.open_thread() == Some(match_id) {
            self.open = None;
            return true;
        }
        false
    }

    pub fn open_thread(&self) -> Option<Uuid> {
        self.open.map(|open| open.match_id)
    }

    /// State of a thread as seen by the current view
    pub fn state(&self, match_id: Uuid) -> GateState {
        match self.open {
            Some(open) if open.match_id == match_id => open.state,
            _ => GateState::Locked,
        }
    }

    pub fn is_unlocked(&self, match_id: Uuid) -> bool {
        self.state(match_id) == GateState::Unlocked
    }

    /// Submit a PIN for a match's thread, opening its view if another one is shown.
    ///
    /// # Errors
    ///
    /// * `ChatError::TooManyAttempts` - attempt limit reached for this thread
    /// * `ChatError::InvalidPinFormat` - input is not a well-formed PIN
    /// * `ChatError::IncorrectPin` - input differs from the thread's PIN
    pub fn submit_pin(
        &mut self,
        chat_match: &Match,
        pin: &str,
        now: DateTime<Utc>,
    ) -> ChatResult<GateState> {
        if self.open_thread() != Some(chat_match.id) {
            self.open(chat_match.id);
        }

        let key = chat_match.id.to_string();
        if let RateLimitResult::Locked { retry_after } = self.limiter.check(&key, now) {
            return Err(ChatError::TooManyAttempts {
                retry_after_secs: retry_after,
            });
        }

        let candidate = ChatPin::parse(pin)?;

        if !chat_match.chat_pin.verify(&candidate) {
            log::warn!("Incorrect PIN for chat {}", chat_match.id);
            return Err(match self.limiter.record_failure(&key, now) {
                RateLimitResult::Allowed { remaining } => ChatError::IncorrectPin { remaining },
                RateLimitResult::Locked { retry_after } => ChatError::TooManyAttempts {
                    retry_after_secs: retry_after,
                },
            });
        }

        self.limiter.reset(&key);
        self.open = Some(OpenThread {
            match_id: chat_match.id,
            state: GateState::Unlocked,
        });
        log::debug!("Chat {} unlocked", chat_match.id);

        Ok(GateState::Unlocked)
    }

    /// Append a message from the current user and schedule the counterpart's reply.
    ///
    /// # Errors
    ///
    /// * `ChatError::Locked` - the thread is not open and unlocked
    /// * `ChatError::EmptyMessage` / `ChatError::MessageTooLong` - invalid text
    pub fn send_message(
        &mut self,
        chat_match: &mut Match,
        text: &str,
        now: DateTime<Utc>,
    ) -> ChatResult<ChatMessage> {
        self.require_unlocked(chat_match.id)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong {
                max: self.config.max_message_length,
            });
        }

        let message = ChatMessage::new(MessageSender::Me, text, now);
        chat_match
            .thread
            .push(message.clone(), self.config.max_messages);
        chat_match.thread.mark_read();

        self.pending.push(PendingReply {
            match_id: chat_match.id,
            due_at: now
                .checked_add_signed(self.config.reply_delay())
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        });

        Ok(message)
    }

    /// Deliver every scheduled reply due at or before `now`.
    ///
    /// Replies for matches that no longer exist are dropped.
    pub fn deliver_due_replies(&mut self, matches: &mut [Match], now: DateTime<Utc>) -> usize {
        let (due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|reply| reply.due_at <= now);
        self.pending = waiting;

        let mut delivered = 0;
        for reply in due {
            if let Some(chat_match) = matches.iter_mut().find(|m| m.id == reply.match_id) {
                let message = ChatMessage::new(
                    MessageSender::Them,
                    self.config.reply_text.clone(),
                    reply.due_at,
                );
                chat_match.thread.push(message, self.config.max_messages);
                delivered += 1;
            }
        }
        delivered
    }

    /// Earliest time a scheduled reply becomes due
    pub fn next_reply_due(&self) -> Option<DateTime<Utc>> {
        self.pending.iter().map(|reply| reply.due_at).min()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Clear the unread counter of an unlocked thread
    ///
    /// # Errors
    ///
    /// * `ChatError::Locked` - the thread is not open and unlocked
    pub fn mark_read(&self, chat_match: &mut Match) -> ChatResult<()> {
        self.require_unlocked(chat_match.id)?;
        chat_match.thread.mark_read();
        Ok(())
    }

    /// Pin a message of an unlocked thread
    ///
    /// # Errors
    ///
    /// * `ChatError::Locked` - the thread is not open and unlocked
    /// * `ChatError::MessageNotFound` - no such message in the thread
    pub fn pin_message(&self, chat_match: &mut Match, message_id: Uuid) -> ChatResult<()> {
        self.require_unlocked(chat_match.id)?;
        chat_match.thread.pin_message(message_id)
    }

    /// Forget session state for a thread whose PIN changed: relock the view
    /// and clear failed attempts.
    pub fn relock(&mut self, match_id: Uuid) {
        if let Some(open) = self.open.as_mut()
            && open.match_id == match_id
        {
            open.state = GateState::Locked;
        }
        self.limiter.reset(&match_id.to_string());
    }

    /// Drop scheduled replies for a thread that is going away
    pub fn forget(&mut self, match_id: Uuid) {
        self.pending.retain(|reply| reply.match_id != match_id);
        self.limiter.reset(&match_id.to_string());
        self.close_if_open(match_id);
    }

    fn require_unlocked(&self, match_id: Uuid) -> ChatResult<()> {
        if self.is_unlocked(match_id) {
            Ok(())
        } else {
            Err(ChatError::Locked(match_id))
        }
    }
}
