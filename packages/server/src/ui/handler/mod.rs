//! Per-connection handlers.

mod connection;
mod negotiation;

pub use connection::handle_connection;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Read one `\n`-terminated line, decoded lossily.
///
/// Returns `None` at end of stream, including a trailing partial line with no newline.
pub(crate) async fn read_line<R>(reader: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).await?;
    if n == 0 || buf.last() != Some(&b'\n') {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
