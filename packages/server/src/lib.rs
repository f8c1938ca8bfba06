//! Line-oriented TCP chat relay library.
//!
//! Clients connect over a raw TCP stream, negotiate a unique display name and exchange
//! newline-terminated messages. Every other participant sees the message injected above
//! their own unsent prompt line.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
