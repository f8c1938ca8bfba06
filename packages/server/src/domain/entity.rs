//! Session entity

use tokio::sync::mpsc;

use super::{
    error::PushError,
    prompt::Prompt,
    value_object::{SessionId, Username},
};

/// Outbound channel drained by a connection's writer task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// An active participant: a negotiated name bound to a live connection.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub name: Username,
    /// Writer side of the connection
    pub outbox: PusherChannel,
    /// Prompt line the client currently has on screen
    pub last_prompt: Prompt,
    /// Prompt drawn when the current read cycle began. Redraws leave it untouched; it is the
    /// prefix of the message this cycle produces.
    pub cycle_prompt: Prompt,
}

impl Session {
    pub fn new(id: SessionId, name: Username, outbox: PusherChannel) -> Self {
        Self {
            id,
            name,
            outbox,
            last_prompt: Prompt::default(),
            cycle_prompt: Prompt::default(),
        }
    }

    /// Queue bytes for the client. Fails once the writer task has stopped.
    pub fn push(&self, content: String) -> Result<(), PushError> {
        self.outbox.send(content).map_err(|_| PushError(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_delivers_to_outbox() {
        // テスト項目: push した内容が outbox に届く
        // given (前提条件):
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = Session::new(
            SessionId::generate(),
            Username::new("alice".to_string()).unwrap(),
            tx,
        );

        // when (操作):
        let result = session.push("hello".to_string());

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.try_recv().unwrap(), "hello");
    }

    #[test]
    fn test_push_fails_after_writer_stopped() {
        // テスト項目: writer が停止した後の push はエラーになる
        // given (前提条件):
        let (tx, rx) = mpsc::unbounded_channel();
        let id = SessionId::generate();
        let session = Session::new(id, Username::new("alice".to_string()).unwrap(), tx);
        drop(rx);

        // when (操作):
        let result = session.push("hello".to_string());

        // then (期待する結果):
        assert_eq!(result, Err(PushError(id)));
    }
}
