//! Infrastructure layer: storage and transport adapters behind the domain traits.

pub mod banner;
pub mod history;
pub mod message_pusher;
