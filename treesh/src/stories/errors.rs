//! Story error types.

use thiserror::Error;
use uuid::Uuid;

use crate::errors::ErrorKind;

/// Story engine errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoryError {
    #[error("Invalid story: {0}")]
    InvalidDraft(String),

    #[error("Story not found: {0}")]
    NotFound(Uuid),

    /// Story passed its expiry but has not been swept yet
    #[error("Story has expired: {0}")]
    Expired(Uuid),

    /// The owning actor has shut down
    #[error("Story service is not running")]
    Closed,
}

impl StoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoryError::InvalidDraft(_) => ErrorKind::Validation,
            StoryError::NotFound(_) | StoryError::Expired(_) | StoryError::Closed => {
                ErrorKind::NotFound
            }
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            StoryError::NotFound(_) | StoryError::Expired(_) => {
                "This story is no longer available".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for story operations
pub type StoryResult<T> = Result<T, StoryError>;
