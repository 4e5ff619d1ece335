//! Arcade error types.

use thiserror::Error;

use super::models::{CandidateId, MatchId};
use crate::{chat::ChatError, errors::ErrorKind};

/// Discovery and match errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArcadeError {
    /// Candidate is not in the active pool (unknown, already swiped or blocked)
    #[error("Candidate not found: {0}")]
    CandidateNotFound(CandidateId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Unblock requested for a user that is not blocked
    #[error("User is not blocked: {0}")]
    NotBlocked(CandidateId),

    #[error("Invalid filters: {0}")]
    InvalidFilters(String),

    #[error("Report reason cannot be empty")]
    EmptyReportReason,

    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl ArcadeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArcadeError::CandidateNotFound(_)
            | ArcadeError::MatchNotFound(_)
            | ArcadeError::NotBlocked(_) => ErrorKind::NotFound,
            ArcadeError::InvalidFilters(_) | ArcadeError::EmptyReportReason => {
                ErrorKind::Validation
            }
            ArcadeError::Chat(err) => err.kind(),
        }
    }

    /// Message suitable for a transient notification
    pub fn client_message(&self) -> String {
        match self {
            ArcadeError::CandidateNotFound(_) => "This profile is no longer available".to_string(),
            ArcadeError::MatchNotFound(_) => "Match not found".to_string(),
            ArcadeError::EmptyReportReason => "Please describe the problem".to_string(),
            ArcadeError::Chat(err) => err.client_message(),
            _ => self.to_string(),
        }
    }
}

/// Result type for arcade operations
pub type ArcadeResult<T> = Result<T, ArcadeError>;
