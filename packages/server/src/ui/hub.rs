//! Central event loop owning the session registry.
//!
//! Connection handlers never touch the registry. They submit join requests and session
//! events over bounded channels, and the hub applies them one at a time, so every
//! registry mutation and every broadcast happens in a single task.

use std::{collections::VecDeque, sync::Arc};

use linechat_shared::time::Clock;
use tokio::sync::{OwnedSemaphorePermit, mpsc, oneshot};

use crate::{
    config::HUB_CHANNEL_CAPACITY,
    domain::{HistoryLog, PusherChannel, SessionId, SessionRegistry, Username},
    usecase::{
        JoinError, JoinSessionUseCase, LeaveSessionUseCase, SendMessageError, SendMessageUseCase,
    },
};

/// Registration of a session that has negotiated a valid name
#[derive(Debug)]
pub struct JoinRequest {
    pub session_id: SessionId,
    pub name: Username,
    pub outbox: PusherChannel,
    pub reply: oneshot::Sender<Result<(), JoinError>>,
}

/// Everything a joined session reports to the hub, in the order it happened
#[derive(Debug)]
pub enum SessionEvent {
    /// The session is about to read a line; draw its prompt
    Prompt { session_id: SessionId },
    /// A non-empty line, without its trailing newline
    Message { session_id: SessionId, text: String },
    /// The connection ended. The capacity slot is released once the session is removed.
    Departed {
        session_id: SessionId,
        permit: Option<OwnedSemaphorePermit>,
    },
}

/// Sending half of the hub's channels, cloned into every connection handler
#[derive(Debug, Clone)]
pub struct HubHandle {
    pub joins: mpsc::Sender<JoinRequest>,
    pub events: mpsc::Sender<SessionEvent>,
}

pub struct Hub {
    registry: SessionRegistry,
    join_session_usecase: JoinSessionUseCase,
    send_message_usecase: SendMessageUseCase,
    leave_session_usecase: LeaveSessionUseCase,
}

impl Hub {
    pub fn new(history: Arc<dyn HistoryLog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: SessionRegistry::new(),
            join_session_usecase: JoinSessionUseCase::new(history.clone(), clock.clone()),
            send_message_usecase: SendMessageUseCase::new(history.clone(), clock.clone()),
            leave_session_usecase: LeaveSessionUseCase::new(history, clock),
        }
    }

    /// Start the hub on its own task.
    ///
    /// The hub stops once every [`HubHandle`] clone has been dropped.
    pub fn spawn(self) -> HubHandle {
        let (joins_tx, joins_rx) = mpsc::channel(HUB_CHANNEL_CAPACITY);
        let (events_tx, events_rx) = mpsc::channel(HUB_CHANNEL_CAPACITY);
        tokio::spawn(self.run(joins_rx, events_rx));
        HubHandle {
            joins: joins_tx,
            events: events_tx,
        }
    }

    pub async fn run(
        mut self,
        mut joins: mpsc::Receiver<JoinRequest>,
        mut events: mpsc::Receiver<SessionEvent>,
    ) {
        loop {
            tokio::select! {
                Some(request) = joins.recv() => self.handle_join(request).await,
                Some(event) = events.recv() => self.handle_event(event).await,
                else => break,
            }
        }
        tracing::debug!("Hub stopped with {} sessions registered", self.registry.len());
    }

    async fn handle_join(&mut self, request: JoinRequest) {
        let JoinRequest {
            session_id,
            name,
            outbox,
            reply,
        } = request;

        let result = self
            .join_session_usecase
            .execute(&mut self.registry, session_id, name.clone(), outbox)
            .await;

        let mut failed = match &result {
            Ok(failed) => {
                tracing::info!("'{}' joined ({} online)", name, self.registry.len());
                tracing::debug!("Online: {:?}", self.registry.names());
                failed.clone()
            }
            Err(e) => {
                tracing::debug!("Join of '{}' refused: {}", name, e);
                Vec::new()
            }
        };

        let joined = result.is_ok();
        if reply.send(result.map(|_| ())).is_err() && joined {
            // Negotiating task is gone, so no Departed will follow for this session
            failed.push(session_id);
        }

        self.depart(failed).await;
    }

    async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Prompt { session_id } => {
                match self
                    .send_message_usecase
                    .render_prompt(&mut self.registry, &session_id)
                {
                    Ok(()) => {}
                    Err(SendMessageError::ConnectionClosed(_)) => {
                        self.depart(vec![session_id]).await
                    }
                    Err(e) => tracing::debug!("Prompt skipped: {}", e),
                }
            }
            SessionEvent::Message { session_id, text } => {
                match self
                    .send_message_usecase
                    .execute(&mut self.registry, &session_id, &text)
                    .await
                {
                    Ok(failed) => self.depart(failed).await,
                    Err(e) => tracing::debug!("Message dropped: {}", e),
                }
            }
            SessionEvent::Departed { session_id, permit } => {
                self.depart(vec![session_id]).await;
                drop(permit);
            }
        }
    }

    /// Remove sessions and announce each departure. Peers found closed while announcing
    /// are queued and removed in turn.
    async fn depart(&mut self, sessions: Vec<SessionId>) {
        let mut queue = VecDeque::from(sessions);
        while let Some(session_id) = queue.pop_front() {
            if let Some(outcome) = self
                .leave_session_usecase
                .execute(&mut self.registry, &session_id)
                .await
            {
                tracing::info!("'{}' left ({} online)", outcome.name, self.registry.len());
                queue.extend(outcome.failed);
            }
        }
    }
}
