//! Chat error types.

use thiserror::Error;
use uuid::Uuid;

use crate::errors::ErrorKind;

/// Chat gate errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    /// PIN is not exactly four ASCII digits
    #[error("PIN must be exactly {expected} digits")]
    InvalidPinFormat { expected: usize },

    /// PIN did not match
    #[error("Incorrect PIN: {remaining} attempts remaining")]
    IncorrectPin { remaining: u32 },

    /// Attempt limit reached
    #[error("Too many PIN attempts: retry after {retry_after_secs}s")]
    TooManyAttempts { retry_after_secs: u64 },

    /// Thread is not open and unlocked
    #[error("Chat {0} is locked")]
    Locked(Uuid),

    /// Message text is empty after trimming
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// Message text is too long
    #[error("Message exceeds {max} characters")]
    MessageTooLong { max: usize },

    /// Message ID not present in the thread
    #[error("Message not found: {0}")]
    MessageNotFound(Uuid),
}

impl ChatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::InvalidPinFormat { .. }
            | ChatError::EmptyMessage
            | ChatError::MessageTooLong { .. } => ErrorKind::Validation,
            ChatError::IncorrectPin { .. } | ChatError::Locked(_) => ErrorKind::Auth,
            ChatError::TooManyAttempts { .. } => ErrorKind::RateLimited,
            ChatError::MessageNotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Message suitable for a transient notification
    pub fn client_message(&self) -> String {
        match self {
            ChatError::IncorrectPin { .. } => "Incorrect PIN, please try again".to_string(),
            ChatError::Locked(_) => "Enter the chat PIN to continue".to_string(),
            ChatError::MessageNotFound(_) => "Message not found".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;
