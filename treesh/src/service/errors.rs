//! Service error types.

use thiserror::Error;

use crate::{
    arcade::ArcadeError, chat::ChatError, errors::ErrorKind, settings::SettingsError,
};

/// Errors surfaced by a [`DataService`](super::DataService)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Arcade(#[from] ArcadeError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl From<ChatError> for ServiceError {
    fn from(err: ChatError) -> Self {
        ServiceError::Arcade(ArcadeError::Chat(err))
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Arcade(err) => err.kind(),
            ServiceError::Settings(err) => err.kind(),
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            ServiceError::Arcade(err) => err.client_message(),
            ServiceError::Settings(err) => err.client_message(),
        }
    }
}

/// Result type for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;
