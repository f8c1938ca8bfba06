//! Writer task for a byte stream connection.

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::mpsc,
    task::JoinHandle,
};

/// Spawns a task that receives messages from the rx channel and writes them to the connection.
///
/// The task ends when every sender is dropped (after flushing and shutting down the writer)
/// or when a write fails. Once it has ended, pushes into the channel fail, which is how a
/// dead connection is noticed by the broadcaster.
///
/// # Arguments
///
/// * `rx` - Channel receiver for text queued for this client
/// * `writer` - Write half of the client connection
pub fn pusher_loop<W>(mut rx: mpsc::UnboundedReceiver<String>, mut writer: W) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = writer.write_all(msg.as_bytes()).await {
                tracing::debug!("Write to client failed: {}", e);
                return;
            }
        }
        if let Err(e) = writer.shutdown().await {
            tracing::debug!("Shutdown of client writer failed: {}", e);
        }
    })
}
