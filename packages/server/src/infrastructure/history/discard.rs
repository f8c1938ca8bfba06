//! History log used when the real backing store could not be opened.

use async_trait::async_trait;

use crate::domain::{HistoryError, HistoryLog};

/// Accepts appends without storing them and reports replay as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardHistoryLog;

#[async_trait]
impl HistoryLog for DiscardHistoryLog {
    async fn append(&self, record: &str) -> Result<(), HistoryError> {
        tracing::trace!("History disabled, discarding record: {:?}", record);
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<u8>, HistoryError> {
        Err(HistoryError::Unavailable)
    }
}
