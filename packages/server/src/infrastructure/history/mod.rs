//! `HistoryLog` implementations
//!
//! - `file`: one append-only file per server run
//! - `memory`: in-process log, used by tests and embedders
//! - `discard`: stand-in when the log file cannot be opened

pub mod discard;
pub mod file;
pub mod memory;

pub use discard::DiscardHistoryLog;
pub use file::FileHistoryLog;
pub use memory::InMemoryHistoryLog;

use linechat_shared::time::{Clock, LOG_TIME_FORMAT, format_local};

/// `YYYY/MM/DD HH:MM:SS <record>\n`
pub(crate) fn format_history_line(clock: &dyn Clock, record: &str) -> String {
    format!(
        "{} {}\n",
        format_local(clock.now_millis(), LOG_TIME_FORMAT),
        record
    )
}
