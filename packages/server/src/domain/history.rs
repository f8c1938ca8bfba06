//! History log trait definition
//!
//! The hub needs exactly two things from storage: append one formatted record, and read
//! everything written so far for replay. Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::error::HistoryError;

/// Append-only chat history shared by all sessions of one server run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryLog: Send + Sync {
    /// Append one record. The implementation prefixes its own timestamp.
    async fn append(&self, record: &str) -> Result<(), HistoryError>;

    /// Full snapshot of everything appended so far, in order.
    async fn read_all(&self) -> Result<Vec<u8>, HistoryError>;
}
