//! Server configuration and defaults.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8989;
pub const DEFAULT_MAX_CONNECTIONS: usize = 10;
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_BANNER_PATH: &str = "static/logo.txt";

/// Capacity of each hub inbound channel. Senders wait until the hub drains the previous event.
pub const HUB_CHANNEL_CAPACITY: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Sessions admitted at once, including those still negotiating a name
    pub max_connections: usize,
    /// Directory receiving one history file per run
    pub log_dir: PathBuf,
    /// Welcome banner, read on every new connection
    pub banner_path: PathBuf,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            banner_path: PathBuf::from(DEFAULT_BANNER_PATH),
        }
    }
}
