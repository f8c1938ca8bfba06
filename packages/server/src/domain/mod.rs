//! Domain layer: value objects, sessions, the registry and the redraw protocol.

pub mod entity;
pub mod error;
pub mod history;
pub mod prompt;
pub mod registry;
pub mod value_object;

pub use entity::{PusherChannel, Session};
pub use error::{HistoryError, PushError, RegistryError, UsernameError};
pub use history::HistoryLog;
pub use prompt::{Prompt, bracket};
pub use registry::SessionRegistry;
pub use value_object::{SessionId, USERNAME_MAX_CHARS, Username};
