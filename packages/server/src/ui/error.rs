//! Server and session error types.

use thiserror::Error;

use crate::usecase::JoinError;

/// Reasons a single session ends. None of these affect other sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection closed")]
    Disconnected,

    #[error("Hub is no longer running")]
    HubClosed,

    #[error(transparent)]
    Join(#[from] JoinError),
}

/// Process-level failures. Only binding the listener is fatal.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
