//! InMemory history log implementation

use std::sync::Arc;

use async_trait::async_trait;
use linechat_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{HistoryError, HistoryLog};

use super::format_history_line;

/// History kept in a `Vec`, formatted exactly like the file-backed log.
pub struct InMemoryHistoryLog {
    lines: Mutex<Vec<String>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryHistoryLog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Formatted lines (including the trailing newline) in append order.
    pub async fn lines(&self) -> Vec<String> {
        self.lines.lock().await.clone()
    }
}

#[async_trait]
impl HistoryLog for InMemoryHistoryLog {
    async fn append(&self, record: &str) -> Result<(), HistoryError> {
        let line = format_history_line(self.clock.as_ref(), record);
        self.lines.lock().await.push(line);
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<u8>, HistoryError> {
        let lines = self.lines.lock().await;
        Ok(lines.concat().into_bytes())
    }
}
