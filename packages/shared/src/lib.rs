//! Utilities shared by the linechat binaries and library crates.

pub mod logger;
pub mod time;
