//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Local, Utc};

/// `2006-01-02 15:04:05` style, used inside chat prompts.
pub const PROMPT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `2006/01/02 15:04:05` style, used as the prefix of every history line.
pub const LOG_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Filesystem-safe variant used to name the per-run history file.
pub const FILE_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a Unix timestamp (milliseconds) in the local timezone with the given format.
///
/// Out-of-range timestamps fall back to the Unix epoch.
pub fn format_local(timestamp_millis: i64, format: &str) -> String {
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_millis).unwrap_or_default();
    utc.with_timezone(&Local).format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        // テスト項目: SystemClock が呼び出すたびに増加するタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp1 = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let timestamp2 = clock.now_millis();

        // then (期待する結果):
        assert!(timestamp1 > 0);
        assert!(timestamp2 >= timestamp1);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_timestamp() {
        // テスト項目: FixedClock が複数回呼び出しても同じタイムスタンプを返す
        // given (前提条件):
        let fixed_time = 9876543210987;
        let clock = FixedClock::new(fixed_time);

        // when (操作):
        let timestamp1 = clock.now_millis();
        let timestamp2 = clock.now_millis();

        // then (期待する結果):
        assert_eq!(timestamp1, fixed_time);
        assert_eq!(timestamp2, fixed_time);
    }

    #[test]
    fn test_format_local_has_fixed_width() {
        // テスト項目: プロンプト用の時刻表記は常に 19 文字になる
        // given (前提条件):
        let early = 0;
        let late = 1_700_000_000_000;

        // when (操作):
        let early_str = format_local(early, PROMPT_TIME_FORMAT);
        let late_str = format_local(late, PROMPT_TIME_FORMAT);

        // then (期待する結果):
        assert_eq!(early_str.len(), 19);
        assert_eq!(late_str.len(), 19);
    }

    #[test]
    fn test_format_local_log_and_file_formats() {
        // テスト項目: ログ用・ファイル名用のフォーマットが区切り文字を正しく使う
        // given (前提条件):
        let timestamp = 1_700_000_000_000;

        // when (操作):
        let log_str = format_local(timestamp, LOG_TIME_FORMAT);
        let file_str = format_local(timestamp, FILE_TIME_FORMAT);

        // then (期待する結果):
        assert_eq!(log_str.matches('/').count(), 2);
        assert!(!file_str.contains(':'));
        assert!(!file_str.contains(' '));
    }

    #[test]
    fn test_format_local_out_of_range_falls_back_to_epoch() {
        // テスト項目: 範囲外のタイムスタンプはエポックとして扱われる
        // given (前提条件):
        let out_of_range = i64::MAX;

        // when (操作):
        let result = format_local(out_of_range, PROMPT_TIME_FORMAT);

        // then (期待する結果):
        assert_eq!(result, format_local(0, PROMPT_TIME_FORMAT));
    }
}
