//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::registry::LoaderRegistry;
use crate::storage::MediaRepository;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Holds only process-wide resources. Anything request-scoped, such as the
/// loader registry, is attached to the request by middleware instead.
#[derive(Clone)]
pub struct AppState {
    /// Configuration (shared read-only)
    pub config: Arc<Config>,
    /// Media repository
    pub repository: Arc<dyn MediaRepository>,
}

impl AppState {
    pub fn new(config: Config, repository: Arc<dyn MediaRepository>) -> Self {
        Self {
            config: Arc::new(config),
            repository,
        }
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a fresh loader registry over the shared repository
    pub fn new_registry(&self) -> LoaderRegistry {
        LoaderRegistry::new(Arc::clone(&self.repository), &self.config.loaders)
    }
}
