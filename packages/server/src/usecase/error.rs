//! UseCase errors

use thiserror::Error;

use crate::domain::{PushError, RegistryError, SessionId, UsernameError};

/// Join failures reported back to the negotiating session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// Recoverable: the client is re-prompted with the hint
    #[error(transparent)]
    InvalidName(#[from] UsernameError),

    #[error("Session '{0}' is already registered")]
    DuplicateSession(SessionId),
}

impl From<RegistryError> for JoinError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NameTaken(_) => JoinError::InvalidName(UsernameError::NameTaken),
            RegistryError::DuplicateSession(id) => JoinError::DuplicateSession(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("Session '{0}' is not registered")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    ConnectionClosed(#[from] PushError),
}
