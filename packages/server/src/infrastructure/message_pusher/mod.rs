//! Delivery of queued text to client connections.
//!
//! Every connection gets one writer task draining its `PusherChannel`. The hub only ever
//! touches the channel, so a slow or dead socket never blocks it.

pub mod stream;

pub use stream::pusher_loop;
