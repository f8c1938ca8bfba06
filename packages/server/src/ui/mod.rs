//! TCP chat server: listener, admission control, connection handlers and the hub.

pub mod admission;
mod error;
mod handler;
pub mod hub;
mod server;
mod signal;
pub mod state;

pub use error::{ServerError, SessionError};
pub use server::Server;
