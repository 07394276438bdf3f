//! Web server for mediabin.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::{MediabinError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Web server wrapping the router and listener setup.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server from configuration.
    pub fn new(config: &Config, app_state: AppState) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| MediabinError::Config(format!("invalid server address: {e}")))?;

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
        })
    }

    /// Get the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server until it fails or the process exits.
    pub async fn run(self) -> Result<()> {
        let router = create_router(self.app_state);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Server running at http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// Useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = create_router(self.app_state);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Server running at http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
