//! File-backed history log
//!
//! One file per server run, named after the start time, opened in append mode. Lines are
//! never rewritten, rotated or truncated while the server runs.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use linechat_shared::time::{Clock, FILE_TIME_FORMAT, format_local};
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    sync::Mutex,
};

use crate::domain::{HistoryError, HistoryLog};

use super::format_history_line;

pub struct FileHistoryLog {
    path: PathBuf,
    /// Serializes appends and keeps a snapshot read from interleaving with a write
    file: Mutex<File>,
    clock: Arc<dyn Clock>,
}

impl FileHistoryLog {
    /// Create `<dir>/<YYYY-MM-DD_HH-MM-SS>.log` for a run starting now.
    ///
    /// The directory is created if missing.
    pub async fn create(dir: &Path, clock: Arc<dyn Clock>) -> Result<Self, HistoryError> {
        tokio::fs::create_dir_all(dir).await?;
        let file_name = format!("{}.log", format_local(clock.now_millis(), FILE_TIME_FORMAT));
        Self::open(dir.join(file_name), clock).await
    }

    /// Open (or create) a history file in append mode.
    pub async fn open(path: PathBuf, clock: Arc<dyn Clock>) -> Result<Self, HistoryError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            file: Mutex::new(file),
            clock,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryLog for FileHistoryLog {
    async fn append(&self, record: &str) -> Result<(), HistoryError> {
        let line = format_history_line(self.clock.as_ref(), record);
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<u8>, HistoryError> {
        let _guard = self.file.lock().await;
        Ok(tokio::fs::read(&self.path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linechat_shared::time::{FixedClock, LOG_TIME_FORMAT};

    const FIXED_TIME: i64 = 1_700_000_000_000;

    fn unique_test_dir() -> PathBuf {
        std::env::temp_dir().join(format!("linechat-history-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_create_names_file_after_start_time() {
        // テスト項目: ログファイル名が起動時刻から作られ、ディレクトリも作成される
        // given (前提条件):
        let dir = unique_test_dir();
        let clock = Arc::new(FixedClock::new(FIXED_TIME));

        // when (操作):
        let log = FileHistoryLog::create(&dir, clock).await.unwrap();

        // then (期待する結果):
        let expected = dir.join(format!(
            "{}.log",
            format_local(FIXED_TIME, FILE_TIME_FORMAT)
        ));
        assert_eq!(log.path(), expected.as_path());
        assert!(expected.exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_append_then_read_all() {
        // テスト項目: 追記したレコードがタイムスタンプ付きで順に読み出せる
        // given (前提条件):
        let dir = unique_test_dir();
        let log = FileHistoryLog::create(&dir, Arc::new(FixedClock::new(FIXED_TIME)))
            .await
            .unwrap();

        // when (操作):
        log.append("alice has joined the chat").await.unwrap();
        log.append("\r[x][alice]: hello").await.unwrap();
        let snapshot = String::from_utf8(log.read_all().await.unwrap()).unwrap();

        // then (期待する結果):
        let stamp = format_local(FIXED_TIME, LOG_TIME_FORMAT);
        assert_eq!(
            snapshot,
            format!("{stamp} alice has joined the chat\n{stamp} \r[x][alice]: hello\n")
        );

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_open_appends_to_existing_file() {
        // テスト項目: 既存ファイルを開いた場合は内容を保持したまま追記される
        // given (前提条件):
        let dir = unique_test_dir();
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("existing.log");
        tokio::fs::write(&path, "earlier line\n").await.unwrap();
        let clock = Arc::new(FixedClock::new(FIXED_TIME));

        // when (操作):
        let log = FileHistoryLog::open(path, clock).await.unwrap();
        log.append("later").await.unwrap();

        // then (期待する結果):
        let snapshot = String::from_utf8(log.read_all().await.unwrap()).unwrap();
        assert!(snapshot.starts_with("earlier line\n"));
        assert!(snapshot.ends_with(" later\n"));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_fails_when_directory_is_a_file() {
        // テスト項目: ログディレクトリを作成できない場合はエラーを返す
        // given (前提条件):
        let blocker = unique_test_dir();
        tokio::fs::write(&blocker, "not a directory").await.unwrap();

        // when (操作):
        let result = FileHistoryLog::create(&blocker, Arc::new(FixedClock::new(FIXED_TIME))).await;

        // then (期待する結果):
        assert!(matches!(result, Err(HistoryError::Io(_))));

        tokio::fs::remove_file(&blocker).await.unwrap();
    }
}
