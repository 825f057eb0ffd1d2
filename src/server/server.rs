//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::server::middleware::{LoaderMiddleware, RequestIdMiddleware};
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::{MediaRepository, SeaOrmRepository};
use crate::utils::error::{MediaError, Result};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server backed by the configured database
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let repository = SeaOrmRepository::connect(&config.storage.database).await?;
        if config.storage.database.run_migrations {
            repository.migrate().await?;
        }

        Ok(Self::from_state(AppState::new(
            config.clone(),
            Arc::new(repository),
        )))
    }

    /// Create a server over an existing repository
    pub fn with_repository(config: &Config, repository: Arc<dyn MediaRepository>) -> Self {
        Self::from_state(AppState::new(config.clone(), repository))
    }

    pub fn from_state(state: AppState) -> Self {
        Self {
            config: state.config.server.clone(),
            state,
        }
    }

    /// Create the Actix-web application
    ///
    /// Every request gets its own request id and loader registry. The loader
    /// middleware sits inside the request id middleware so its span can
    /// carry the id.
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let loaders = LoaderMiddleware::from_state(&state);

        App::new()
            .app_data(state)
            .wrap(loaders)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "mediagraph")))
            .configure(routes::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();
        let timeout = Duration::from_secs(self.config.timeout);

        info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .keep_alive(timeout)
            .client_request_timeout(timeout)
            .bind(&bind_addr)
            .map_err(|e| {
                error!("Failed to bind {}: {}", bind_addr, e);
                MediaError::Io(e)
            })?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| MediaError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
