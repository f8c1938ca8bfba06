//! Username negotiation: the handshake run on every admitted connection.

use tokio::{
    io::AsyncBufRead,
    sync::{mpsc, oneshot},
};

use crate::{
    domain::{PusherChannel, SessionId, Username},
    ui::{error::SessionError, hub::JoinRequest},
    usecase::JoinError,
};

use super::read_line;

pub const WELCOME_MESSAGE: &str = "Welcome to TCP-Chat!\n";
pub const NAME_PROMPT: &str = "[ENTER YOUR NAME]: ";

/// Greet the client and prompt until it proposes a name the hub accepts.
///
/// Invalid or taken names are answered with their hint and a fresh prompt, without limit.
/// On success the session is already registered with the hub, using `outbox` as its
/// outbound channel.
///
/// # Errors
///
/// * `SessionError::Disconnected` - the client closed the stream or its writer is gone
/// * `SessionError::Io` - reading from the client failed
/// * `SessionError::HubClosed` - the hub stopped before answering
pub async fn negotiate_username<R>(
    reader: &mut R,
    session_id: SessionId,
    outbox: &PusherChannel,
    joins: &mpsc::Sender<JoinRequest>,
    banner: &[u8],
) -> Result<Username, SessionError>
where
    R: AsyncBufRead + Unpin,
{
    let welcome = format!(
        "{}{}\n",
        WELCOME_MESSAGE,
        String::from_utf8_lossy(banner)
    );
    push(outbox, welcome)?;

    loop {
        push(outbox, NAME_PROMPT.to_string())?;

        let Some(line) = read_line(reader).await? else {
            return Err(SessionError::Disconnected);
        };

        let name = match Username::parse_input(&line) {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!("Session {} proposed an invalid name: {}", session_id, e);
                push(outbox, e.hint())?;
                continue;
            }
        };

        let (reply, reply_rx) = oneshot::channel();
        joins
            .send(JoinRequest {
                session_id,
                name: name.clone(),
                outbox: outbox.clone(),
                reply,
            })
            .await
            .map_err(|_| SessionError::HubClosed)?;

        match reply_rx.await.map_err(|_| SessionError::HubClosed)? {
            Ok(()) => return Ok(name),
            Err(JoinError::InvalidName(e)) => push(outbox, e.hint())?,
            Err(e) => return Err(e.into()),
        }
    }
}

fn push(outbox: &PusherChannel, message: String) -> Result<(), SessionError> {
    outbox
        .send(message)
        .map_err(|_| SessionError::Disconnected)
}
