//! Chat data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use super::errors::{ChatError, ChatResult};
use crate::random::RandomSource;

/// Digits in every chat PIN
pub const PIN_LENGTH: usize = 4;

/// Four-digit shared secret gating a match's chat thread
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatPin(String);

impl ChatPin {
    /// Draw a PIN from `1000..=9999`
    pub fn generate(rng: &mut dyn RandomSource) -> Self {
        Self(rng.next_in_range(1000, 9999).to_string())
    }

    /// Parse user input as a PIN of exactly [`PIN_LENGTH`] ASCII digits
    ///
    /// # Errors
    ///
    /// * `ChatError::InvalidPinFormat` - wrong length or a non-digit character
    pub fn parse(input: &str) -> ChatResult<Self> {
        if input.len() != PIN_LENGTH || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ChatError::InvalidPinFormat {
                expected: PIN_LENGTH,
            });
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against another PIN
    pub fn verify(&self, other: &ChatPin) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

// PINs stay out of debug output and logs
impl std::fmt::Debug for ChatPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChatPin(****)")
    }
}

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    System,
    Me,
    Them,
}

impl std::fmt::Display for MessageSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageSender::System => write!(f, "system"),
            MessageSender::Me => write!(f, "me"),
            MessageSender::Them => write!(f, "them"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: MessageSender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub pinned: bool,
}

impl ChatMessage {
    pub fn new(sender: MessageSender, text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            sent_at,
            pinned: false,
        }
    }
}

/// Ordered message history of one match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatThread {
    messages: Vec<ChatMessage>,
    unread_count: u32,
}

impl ChatThread {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Thread opened by a match, with the announcing system message
    pub fn seeded(announcement: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            messages: vec![ChatMessage::new(MessageSender::System, announcement, now)],
            unread_count: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message, dropping the oldest non-system message past `max_messages`
    pub(crate) fn push(&mut self, message: ChatMessage, max_messages: usize) {
        if message.sender == MessageSender::Them {
            self.unread_count += 1;
        }
        self.messages.push(message);

        while self.messages.len() > max_messages.max(1) {
            let victim = self
                .messages
                .iter()
                .position(|m| m.sender != MessageSender::System)
                .unwrap_or(0);
            let evicted = self.messages.remove(victim);

            // Unread replies are the newest ones; never count more than remain
            if evicted.sender == MessageSender::Them {
                let replies_left = self
                    .messages
                    .iter()
                    .filter(|m| m.sender == MessageSender::Them)
                    .count();
                self.unread_count = self.unread_count.min(replies_left as u32);
            }
        }
    }

    pub(crate) fn mark_read(&mut self) {
        self.unread_count = 0;
    }

    pub(crate) fn pin_message(&mut self, message_id: Uuid) -> ChatResult<()> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or(ChatError::MessageNotFound(message_id))?;
        message.pinned = true;
        Ok(())
    }
}

/// List entry for a match's chat, safe to show while the thread is locked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub match_id: Uuid,
    pub candidate_name: String,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub unread_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SequenceRandom, StdRandom};

    #[test]
    fn test_generated_pins_are_four_digits() {
        let mut rng = StdRandom::seeded(1);
        for _ in 0..500 {
            let pin = ChatPin::generate(&mut rng);
            assert_eq!(pin.as_str().len(), PIN_LENGTH);
            assert!(pin.as_str().bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_sequence_pin_starts_at_lowest() {
        let mut rng = SequenceRandom::new([]);
        assert_eq!(ChatPin::generate(&mut rng).as_str(), "1000");
        assert_eq!(ChatPin::generate(&mut rng).as_str(), "1001");
    }

    #[test]
    fn test_parse_rejects_bad_format() {
        assert!(ChatPin::parse("1234").is_ok());
        for bad in ["123", "12345", "12a4", "", " 123", "١٢٣٤"] {
            assert_eq!(
                ChatPin::parse(bad),
                Err(ChatError::InvalidPinFormat { expected: 4 }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_verify_is_exact() {
        let pin = ChatPin::parse("1234").unwrap();
        assert!(pin.verify(&ChatPin::parse("1234").unwrap()));
        assert!(!pin.verify(&ChatPin::parse("1235").unwrap()));
        assert!(!pin.verify(&ChatPin("123".to_string())));
    }

    #[test]
    fn test_debug_hides_pin() {
        let pin = ChatPin::parse("4321").unwrap();
        assert!(!format!("{pin:?}").contains("4321"));
    }

    #[test]
    fn test_push_caps_but_keeps_system_message() {
        let now = Utc::now();
        let mut thread = ChatThread::seeded("You matched!", now);
        for i in 0..5 {
            thread.push(ChatMessage::new(MessageSender::Me, format!("m{i}"), now), 3);
        }

        let texts: Vec<_> = thread.messages().iter().map(|m| m.text.clone()).collect();
        assert_eq!(texts, vec!["You matched!", "m3", "m4"]);
    }

    #[test]
    fn test_replies_count_as_unread() {
        let now = Utc::now();
        let mut thread = ChatThread::new();
        thread.push(ChatMessage::new(MessageSender::Me, "hi", now), 10);
        thread.push(ChatMessage::new(MessageSender::Them, "hey", now), 10);
        thread.push(ChatMessage::new(MessageSender::Them, "there", now), 10);
        assert_eq!(thread.unread_count(), 2);

        thread.mark_read();
        assert_eq!(thread.unread_count(), 0);
    }

    #[test]
    fn test_evicted_replies_leave_unread_count() {
        let now = Utc::now();
        let mut thread = ChatThread::seeded("You matched!", now);
        for i in 0..4 {
            thread.push(ChatMessage::new(MessageSender::Them, format!("r{i}"), now), 3);
        }

        assert_eq!(thread.len(), 3);
        assert_eq!(thread.unread_count(), 2);

        thread.mark_read();
        thread.push(ChatMessage::new(MessageSender::Me, "hi", now), 3);
        thread.push(ChatMessage::new(MessageSender::Them, "new", now), 3);
        assert_eq!(thread.unread_count(), 1);
    }

    #[test]
    fn test_pin_message() {
        let now = Utc::now();
        let mut thread = ChatThread::seeded("You matched!", now);
        let id = thread.messages()[0].id;

        thread.pin_message(id).unwrap();
        assert!(thread.messages()[0].pinned);

        let missing = Uuid::new_v4();
        assert_eq!(
            thread.pin_message(missing),
            Err(ChatError::MessageNotFound(missing))
        );
    }
}
