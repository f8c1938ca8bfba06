//! UseCase: セッション離脱処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveSessionUseCase::execute() メソッド
//! - レジストリからの削除、離脱の記録、残りの参加者への通知
//!
//! ### なぜこのテストが必要か
//! - 離脱通知が残りの参加者に一度だけ届くことを保証
//! - 同じセッションの二重離脱が何も起こさないことを確認
//! - 離脱後に同じ名前が再利用できることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の離脱と通知
//! - エッジケース：最後の参加者の離脱、二重離脱

use std::sync::Arc;

use linechat_shared::time::Clock;

use crate::domain::{HistoryLog, SessionId, SessionRegistry, Username};

/// Result of removing a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub name: Username,
    /// Remaining peers whose connection turned out to be closed
    pub failed: Vec<SessionId>,
}

/// セッション離脱のユースケース
pub struct LeaveSessionUseCase {
    history: Arc<dyn HistoryLog>,
    clock: Arc<dyn Clock>,
}

impl LeaveSessionUseCase {
    pub fn new(history: Arc<dyn HistoryLog>, clock: Arc<dyn Clock>) -> Self {
        Self { history, clock }
    }

    /// セッション離脱を実行
    ///
    /// Returns `None` if the session is not registered (never joined, or already removed).
    pub async fn execute(
        &self,
        registry: &mut SessionRegistry,
        session_id: &SessionId,
    ) -> Option<LeaveOutcome> {
        let session = registry.remove(session_id)?;

        if let Err(e) = self
            .history
            .append(&format!("{} has left the chat", session.name))
            .await
        {
            tracing::warn!("Failed to record leave of '{}': {}", session.name, e);
        }

        let notice = format!("\r{} has left our chat...\n", session.name);
        let failed = registry.broadcast(None, &notice, self.clock.now_millis());

        Some(LeaveOutcome {
            name: session.name,
            failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::Session, infrastructure::history::InMemoryHistoryLog};
    use linechat_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(1_700_000_000_000))
    }

    fn register(
        registry: &mut SessionRegistry,
        name: &str,
    ) -> (SessionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = SessionId::generate();
        registry
            .insert(Session::new(id, Username::new(name.to_string()).unwrap(), tx))
            .unwrap();
        (id, rx)
    }

    #[tokio::test]
    async fn test_leave_session_notifies_remaining_participants() {
        // テスト項目: 離脱すると残りの参加者全員に通知され、履歴に記録される
        // given (前提条件):
        let history = Arc::new(InMemoryHistoryLog::new(clock()));
        let usecase = LeaveSessionUseCase::new(history.clone(), clock());
        let mut registry = SessionRegistry::new();
        let (alice, mut alice_rx) = register(&mut registry, "alice");
        let (_bob, mut bob_rx) = register(&mut registry, "bob");
        let (_carol, mut carol_rx) = register(&mut registry, "carol");

        // when (操作):
        let outcome = usecase.execute(&mut registry, &alice).await;

        // then (期待する結果):
        let outcome = outcome.unwrap();
        assert_eq!(outcome.name.as_str(), "alice");
        assert!(outcome.failed.is_empty());
        assert_eq!(registry.len(), 2);

        assert!(alice_rx.try_recv().is_err());
        for rx in [&mut bob_rx, &mut carol_rx] {
            let received = rx.try_recv().unwrap();
            assert!(received.contains("\ralice has left our chat...\n"));
            assert!(rx.try_recv().is_err());
        }

        let lines = history.lines().await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(" alice has left the chat\n"));
    }

    #[tokio::test]
    async fn test_leave_last_participant() {
        // テスト項目: 最後の参加者が離脱した場合、通知対象はなくレジストリは空になる
        // given (前提条件):
        let usecase = LeaveSessionUseCase::new(Arc::new(InMemoryHistoryLog::new(clock())), clock());
        let mut registry = SessionRegistry::new();
        let (alice, _alice_rx) = register(&mut registry, "alice");

        // when (操作):
        let outcome = usecase.execute(&mut registry, &alice).await.unwrap();

        // then (期待する結果):
        assert!(outcome.failed.is_empty());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_leave_twice_is_noop() {
        // テスト項目: 同じセッションの二度目の離脱は何もしない（通知も記録もされない）
        // given (前提条件):
        let history = Arc::new(InMemoryHistoryLog::new(clock()));
        let usecase = LeaveSessionUseCase::new(history.clone(), clock());
        let mut registry = SessionRegistry::new();
        let (alice, _alice_rx) = register(&mut registry, "alice");
        let (_bob, mut bob_rx) = register(&mut registry, "bob");
        usecase.execute(&mut registry, &alice).await.unwrap();
        bob_rx.try_recv().unwrap();

        // when (操作):
        let outcome = usecase.execute(&mut registry, &alice).await;

        // then (期待する結果):
        assert!(outcome.is_none());
        assert!(bob_rx.try_recv().is_err());
        assert_eq!(history.lines().await.len(), 1);
    }

    #[tokio::test]
    async fn test_name_is_reusable_after_leave() {
        // テスト項目: 離脱後は同じ名前で再登録できる
        // given (前提条件):
        let usecase = LeaveSessionUseCase::new(Arc::new(InMemoryHistoryLog::new(clock())), clock());
        let mut registry = SessionRegistry::new();
        let (alice, _alice_rx) = register(&mut registry, "alice");
        usecase.execute(&mut registry, &alice).await.unwrap();

        // when (操作):
        let name = Username::new("alice".to_string()).unwrap();
        let taken = registry.is_name_taken(&name);

        // then (期待する結果):
        assert!(!taken);
    }

    #[tokio::test]
    async fn test_leave_reports_closed_peers() {
        // テスト項目: 通知時に接続が切れていたピアが返される
        // given (前提条件):
        let usecase = LeaveSessionUseCase::new(Arc::new(InMemoryHistoryLog::new(clock())), clock());
        let mut registry = SessionRegistry::new();
        let (alice, _alice_rx) = register(&mut registry, "alice");
        let (bob, bob_rx) = register(&mut registry, "bob");
        drop(bob_rx);

        // when (操作):
        let outcome = usecase.execute(&mut registry, &alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome.failed, vec![bob]);
    }
}
