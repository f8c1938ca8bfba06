//! Server execution logic.

use std::sync::Arc;

use linechat_shared::time::Clock;
use tokio::net::TcpListener;

use crate::{config::ServerConfig, domain::HistoryLog};

use super::{
    admission::AdmissionController, error::ServerError, handler::handle_connection, hub::Hub,
    signal::shutdown_signal, state::AppState,
};

/// Line-oriented TCP chat server
///
/// # Example
///
/// ```ignore
/// let clock: Arc<dyn Clock> = Arc::new(SystemClock);
/// let history = Arc::new(FileHistoryLog::create(Path::new("logs"), clock.clone()).await?);
/// Server::new(ServerConfig::default(), history, clock).run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// History shared by every session of this run
    history: Arc<dyn HistoryLog>,
    clock: Arc<dyn Clock>,
}

impl Server {
    pub fn new(config: ServerConfig, history: Arc<dyn HistoryLog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            history,
            clock,
        }
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound. Nothing after that is fatal.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        tracing::info!("Listening on the port: {}", listener.local_addr()?.port());
        tracing::info!("Connect with: nc {} {}", self.config.host, self.config.port);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await;
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let hub = Hub::new(self.history, self.clock).spawn();
        let state = Arc::new(AppState {
            hub,
            banner_path: self.config.banner_path,
        });
        let admission = AdmissionController::new(self.config.max_connections);

        tokio::select! {
            _ = accept_loop(&listener, &admission, state) => {},
            _ = shutdown => {},
        }

        tracing::info!("Server shutdown complete");
    }
}

async fn accept_loop(listener: &TcpListener, admission: &AdmissionController, state: Arc<AppState>) {
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(connection) => connection,
            Err(e) => {
                tracing::warn!("Error on accepting the connection: {}", e);
                continue;
            }
        };

        let Some(permit) = admission.try_admit() else {
            tracing::info!(
                "Rejecting {}: maximum of {} connections reached",
                addr,
                admission.max_connections()
            );
            let admission = admission.clone();
            tokio::spawn(async move {
                if let Err(e) = admission.reject(stream).await {
                    tracing::debug!("Failed to notify rejected client {}: {}", addr, e);
                }
            });
            continue;
        };

        tracing::debug!(
            "Accepted {} ({} slots left)",
            addr,
            admission.available()
        );
        tokio::spawn(handle_connection(stream, permit, state.clone()));
    }
}
