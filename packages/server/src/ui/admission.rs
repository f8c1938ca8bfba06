//! Admission control: a fixed number of concurrently admitted connections.

use std::sync::Arc;

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::{OwnedSemaphorePermit, Semaphore},
};

/// One permit per admitted connection, counting sessions that are still negotiating.
#[derive(Clone)]
pub struct AdmissionController {
    slots: Arc<Semaphore>,
    max_connections: usize,
}

impl AdmissionController {
    pub fn new(max_connections: usize) -> Self {
        let max_connections = max_connections.min(Semaphore::MAX_PERMITS);
        Self {
            slots: Arc::new(Semaphore::new(max_connections)),
            max_connections,
        }
    }

    /// Take a slot if one is free. Dropping the permit frees the slot.
    pub fn try_admit(&self) -> Option<OwnedSemaphorePermit> {
        self.slots.clone().try_acquire_owned().ok()
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }

    pub fn rejection_message(&self) -> String {
        format!("Maximum {} connections. Sorry\n", self.max_connections)
    }

    /// Tell a connection over capacity why it is refused, then close it.
    pub async fn reject<W>(&self, mut stream: W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(self.rejection_message().as_bytes()).await?;
        stream.shutdown().await
    }
}
