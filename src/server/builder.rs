//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function used by the binary.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::storage::MediaRepository;
use crate::utils::error::{MediaError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    repository: Option<Arc<dyn MediaRepository>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Serve from `repository` instead of connecting to the configured database
    pub fn with_repository(mut self, repository: Arc<dyn MediaRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| MediaError::config("Configuration is required"))?;

        match self.repository {
            Some(repository) => Ok(HttpServer::with_repository(&config, repository)),
            None => HttpServer::new(&config).await,
        }
    }
}

/// Run the server with `config` until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting mediagraph");

    let server = ServerBuilder::new().with_config(config).build().await?;

    info!("Server starting at: http://{}", server.config().address());
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/scenes/{{id}} - Scene with relationships");
    info!("   GET  /api/scenes?ids=1,2,3 - Scene list with relationships");

    server.start().await
}
