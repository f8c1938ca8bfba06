//! Line-oriented TCP chat server.
//!
//! Clients connect with any raw TCP tool, pick a name and chat. Every message is appended to
//! a per-run history file that newcomers receive on join.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin linechat-server
//! cargo run --bin linechat-server -- 2525 --max-connections 4
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use linechat_server::{
    config::{
        DEFAULT_BANNER_PATH, DEFAULT_HOST, DEFAULT_LOG_DIR, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT,
        ServerConfig,
    },
    domain::HistoryLog,
    infrastructure::history::{DiscardHistoryLog, FileHistoryLog},
    ui::Server,
};
use linechat_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "linechat-server")]
#[command(about = "Line-oriented TCP chat server", long_about = None)]
struct Args {
    /// Port number to listen on
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Maximum number of simultaneous connections
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    max_connections: usize,

    /// Directory for the per-run history file
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,

    /// Welcome banner shown to every new client
    #[arg(long, default_value = DEFAULT_BANNER_PATH)]
    banner: PathBuf,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_connections: args.max_connections,
            log_dir: args.log_dir,
            banner_path: args.banner,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(args);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // History file for this run; chat still works without it
    let history: Arc<dyn HistoryLog> = match FileHistoryLog::create(&config.log_dir, clock.clone()).await
    {
        Ok(log) => {
            tracing::info!("Recording history to {}", log.path().display());
            Arc::new(log)
        }
        Err(e) => {
            tracing::warn!(
                "Error while opening a log file in {}: {}. History is disabled",
                config.log_dir.display(),
                e
            );
            Arc::new(DiscardHistoryLog)
        }
    };

    let server = Server::new(config, history, clock);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
