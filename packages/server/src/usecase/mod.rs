//! UseCase layer
//!
//! Each use case operates on the hub-owned `SessionRegistry` and the shared `HistoryLog`.
//! They are only ever invoked from the hub task, one at a time.

pub mod error;
pub mod join_session;
pub mod leave_session;
pub mod send_message;

pub use error::{JoinError, SendMessageError};
pub use join_session::{HISTORY_UNAVAILABLE_MESSAGE, JoinSessionUseCase};
pub use leave_session::{LeaveOutcome, LeaveSessionUseCase};
pub use send_message::SendMessageUseCase;
