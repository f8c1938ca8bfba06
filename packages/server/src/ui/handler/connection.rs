//! TCP connection handler.

use std::sync::Arc;

use tokio::{
    io::{AsyncBufRead, BufReader},
    net::TcpStream,
    sync::{OwnedSemaphorePermit, mpsc},
};

use crate::{
    domain::{PusherChannel, SessionId},
    infrastructure::{banner::load_banner, message_pusher::pusher_loop},
    ui::{error::SessionError, hub::SessionEvent, state::AppState},
};

use super::{negotiation::negotiate_username, read_line};

/// Drive one admitted connection until it ends, then hand it to the hub's departure path.
///
/// `permit` is the connection's capacity slot. It travels with the departure event and is
/// released by the hub once the session is out of the registry.
pub async fn handle_connection(
    stream: TcpStream,
    permit: OwnedSemaphorePermit,
    state: Arc<AppState>,
) {
    let session_id = SessionId::generate();
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    tracing::debug!("Session {} opened for {}", session_id, peer);

    let (reader, writer) = stream.into_split();
    let (tx, rx) = mpsc::unbounded_channel();

    let mut send_task = pusher_loop(rx, writer);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        run_session(&mut reader, session_id, tx, &state_clone).await
    });

    // If the writer goes first the peer is gone; stop reading as well
    let outcome = tokio::select! {
        result = &mut recv_task => result.ok(),
        _ = &mut send_task => {
            recv_task.abort();
            None
        }
    };

    match outcome {
        Some(Ok(())) | None => tracing::debug!("Session {} ended", session_id),
        Some(Err(e)) => tracing::debug!("Session {} ended: {}", session_id, e),
    }

    if state
        .hub
        .events
        .send(SessionEvent::Departed {
            session_id,
            permit: Some(permit),
        })
        .await
        .is_err()
    {
        tracing::warn!("Hub is gone; session {} could not be deregistered", session_id);
    }
}

async fn run_session<R>(
    reader: &mut R,
    session_id: SessionId,
    outbox: PusherChannel,
    state: &AppState,
) -> Result<(), SessionError>
where
    R: AsyncBufRead + Unpin,
{
    let banner = load_banner(&state.banner_path).await;
    let name =
        negotiate_username(reader, session_id, &outbox, &state.hub.joins, &banner).await?;
    // The registry now holds the session's outbox
    drop(outbox);

    tracing::debug!("Session {} is chatting as '{}'", session_id, name);
    chat_loop(reader, session_id, &state.hub.events).await
}

/// Read lines from a joined session and forward them to the hub.
///
/// Each iteration first asks the hub to draw the prompt. A bare `\n` only redraws it.
/// Returns `Ok(())` when the client closes the stream.
pub(crate) async fn chat_loop<R>(
    reader: &mut R,
    session_id: SessionId,
    events: &mpsc::Sender<SessionEvent>,
) -> Result<(), SessionError>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        events
            .send(SessionEvent::Prompt { session_id })
            .await
            .map_err(|_| SessionError::HubClosed)?;

        let Some(line) = read_line(reader).await? else {
            return Ok(());
        };
        if line == "\n" {
            continue;
        }

        let text = line.strip_suffix('\n').unwrap_or(&line).to_string();
        tracing::debug!("Session {} sent {} bytes", session_id, text.len());
        events
            .send(SessionEvent::Message { session_id, text })
            .await
            .map_err(|_| SessionError::HubClosed)?;
    }
}
