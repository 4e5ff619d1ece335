//! Error classification shared by every module.

use serde::{Deserialize, Serialize};

/// Broad category of a failure, used by callers to pick a user-facing
/// notification without matching on every module's variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input was malformed (empty message, bad PIN format, ...)
    Validation,
    /// The referenced entity is not (or no longer) present
    NotFound,
    /// A chat PIN was wrong or the thread is locked
    Auth,
    /// Too many failed attempts; try again later
    RateLimited,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Auth => write!(f, "auth"),
            ErrorKind::RateLimited => write!(f, "rate_limited"),
        }
    }
}
