//! UseCase: セッション参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinSessionUseCase::execute() メソッド
//! - 名前の重複チェック、履歴の再送、既存参加者への参加通知
//!
//! ### なぜこのテストが必要か
//! - 同時に有効な名前が重複しないことを保証する
//! - 新規参加者が過去の履歴を順序通り、ライブ配信より先に受け取ることを保証する
//! - 履歴ストアの障害が参加処理を止めないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加と通知
//! - 異常系：使用中の名前、履歴の読み出し失敗、履歴の書き込み失敗

use std::sync::Arc;

use linechat_shared::time::Clock;

use crate::domain::{
    HistoryLog, PusherChannel, Session, SessionId, SessionRegistry, Username, UsernameError,
};

use super::error::JoinError;

/// Sent instead of the replay when the history cannot be read.
pub const HISTORY_UNAVAILABLE_MESSAGE: &str = "Message history hasn't been loaded. Sorry\n";

/// セッション参加のユースケース
pub struct JoinSessionUseCase {
    history: Arc<dyn HistoryLog>,
    clock: Arc<dyn Clock>,
}

impl JoinSessionUseCase {
    pub fn new(history: Arc<dyn HistoryLog>, clock: Arc<dyn Clock>) -> Self {
        Self { history, clock }
    }

    /// セッション参加を実行
    ///
    /// The replay is queued on the newcomer's outbox before the session becomes visible to
    /// any broadcast, so history always precedes live traffic on that connection.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - peers whose connection turned out to be closed
    /// * `Err(JoinError)` - the name is taken or the session is already registered
    pub async fn execute(
        &self,
        registry: &mut SessionRegistry,
        session_id: SessionId,
        name: Username,
        outbox: PusherChannel,
    ) -> Result<Vec<SessionId>, JoinError> {
        // 1. 重複チェック
        if registry.contains(&session_id) {
            return Err(JoinError::DuplicateSession(session_id));
        }
        if registry.is_name_taken(&name) {
            return Err(UsernameError::NameTaken.into());
        }

        // 2. 参加を履歴に記録
        if let Err(e) = self
            .history
            .append(&format!("{} has joined the chat", name))
            .await
        {
            tracing::warn!("Failed to record join of '{}': {}", name, e);
        }

        // 3. 履歴を新規参加者へ再送
        let replay = match self.history.read_all().await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!("Can't get the message history: {}", e);
                HISTORY_UNAVAILABLE_MESSAGE.to_string()
            }
        };
        let session = Session::new(session_id, name.clone(), outbox);
        if !replay.is_empty()
            && let Err(e) = session.push(replay)
        {
            // The session's own departure event cleans this up.
            tracing::debug!("Replay for '{}' not delivered: {}", name, e);
        }

        // 4. レジストリに登録
        registry.insert(session)?;

        // 5. 既存参加者へ通知
        let notice = format!("\r{} has joined our chat\n", name);
        Ok(registry.broadcast(Some(&session_id), &notice, self.clock.now_millis()))
    }
}
