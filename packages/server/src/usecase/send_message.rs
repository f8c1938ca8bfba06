//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() / render_prompt() メソッド
//! - 履歴への記録、送信者以外へのブロードキャスト、プロンプトの描画
//!
//! ### なぜこのテストが必要か
//! - 送信者以外の全参加者に、各自のプロンプトを壊さずにメッセージが一度だけ届くことを保証
//! - 送信者自身には重複して届かないことを確認
//! - 書き込みに失敗したピアが離脱処理へ回されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数参加者へのブロードキャスト
//! - エッジケース：送信者のみが接続している場合、接続が切れたピア
//! - 異常系：未登録セッションからの送信

use std::sync::Arc;

use linechat_shared::time::Clock;

use crate::domain::{HistoryLog, Prompt, SessionId, SessionRegistry};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    history: Arc<dyn HistoryLog>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(history: Arc<dyn HistoryLog>, clock: Arc<dyn Clock>) -> Self {
        Self { history, clock }
    }

    /// Draw a fresh prompt on the session's own connection and start a new read cycle.
    pub fn render_prompt(
        &self,
        registry: &mut SessionRegistry,
        session_id: &SessionId,
    ) -> Result<(), SendMessageError> {
        let session = registry
            .get_mut(session_id)
            .ok_or(SendMessageError::SessionNotFound(*session_id))?;

        let prompt = Prompt::render(&session.name, self.clock.now_millis());
        session.push(prompt.as_str().to_string())?;
        session.cycle_prompt = prompt.clone();
        session.last_prompt = prompt;
        Ok(())
    }

    /// メッセージ送信を実行
    ///
    /// The prompt drawn when the sender's read cycle began becomes the message prefix, both
    /// in the history record and in what peers see. Redraws caused by peer traffic during the
    /// cycle do not change it.
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者のセッション ID
    /// * `text` - 改行を除いたメッセージ本文
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - peers whose connection turned out to be closed
    /// * `Err(SendMessageError)` - the sender is not registered
    pub async fn execute(
        &self,
        registry: &mut SessionRegistry,
        from: &SessionId,
        text: &str,
    ) -> Result<Vec<SessionId>, SendMessageError> {
        let prefix = registry
            .get(from)
            .map(|session| session.cycle_prompt.clone())
            .ok_or(SendMessageError::SessionNotFound(*from))?;

        // 1. 履歴に記録
        let record = format!("{}{}", prefix.as_str(), text);
        if let Err(e) = self.history.append(&record).await {
            tracing::warn!("Failed to record message: {}", e);
        }

        // 2. 送信者以外へブロードキャスト
        let body = format!("{}\n", record);
        Ok(registry.broadcast(Some(from), &body, self.clock.now_millis()))
    }
}
