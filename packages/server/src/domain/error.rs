//! Domain error types.

use thiserror::Error;

use super::value_object::{SessionId, USERNAME_MAX_CHARS, Username};

/// Reasons a proposed display name is refused during negotiation.
///
/// The `Display` text is exactly the hint shown to the client before re-prompting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username is required")]
    EmptyName,

    #[error("Username length limit is {limit} characters", limit = USERNAME_MAX_CHARS)]
    NameTooLong,

    #[error("Username shouldn't contain not printable characters")]
    NonPrintableCharacter,

    #[error("This username is taken. Choose another one please")]
    NameTaken,
}

impl UsernameError {
    /// Hint line written to the client ahead of the next name prompt.
    pub fn hint(&self) -> String {
        format!("{}\n", self)
    }
}

/// Session registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Username '{0}' is already in use")]
    NameTaken(Username),

    #[error("Session '{0}' is already registered")]
    DuplicateSession(SessionId),
}

/// Failure to hand bytes to a session's writer task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Connection of session '{0}' is closed")]
pub struct PushError(pub SessionId);

/// History log errors
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History log is unavailable")]
    Unavailable,
}
