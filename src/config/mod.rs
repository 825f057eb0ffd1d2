//! Configuration management
//!
//! Configuration is read from an optional YAML file, environment variables
//! are applied on top, then every section is validated.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{MediaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub const ENV_HOST: &str = "MEDIAGRAPH_HOST";
pub const ENV_PORT: &str = "MEDIAGRAPH_PORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_LOADER_WAIT_MS: &str = "LOADER_WAIT_MS";
pub const ENV_LOADER_MAX_BATCH: &str = "LOADER_MAX_BATCH";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Loader batching configuration
    #[serde(default)]
    pub loaders: LoaderSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the configuration used by the server binary
    ///
    /// Starts from `path` when given, otherwise from the defaults, and applies
    /// environment overrides before validating.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_overrides(path, |key| std::env::var(key).ok()).await
    }

    /// [`Config::load`] with overrides taken from `lookup`
    ///
    /// Validation runs once, after the overrides, so an override can replace
    /// a file value that would not validate on its own.
    pub async fn load_with_overrides<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match path {
            Some(path) => Self::read_file(path).await?,
            None => Self::default(),
        };
        let config = config.with_overrides(lookup)?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path.as_ref()).await?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    async fn read_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MediaError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Load configuration from environment variables over the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| MediaError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = parse_var(ENV_PORT, &port)?;
        }
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.storage.database.url = url;
        }
        if let Some(wait) = lookup(ENV_LOADER_WAIT_MS) {
            self.loaders.wait_ms = parse_var(ENV_LOADER_WAIT_MS, &wait)?;
        }
        if let Some(max_batch) = lookup(ENV_LOADER_MAX_BATCH) {
            self.loaders.max_batch = parse_var(ENV_LOADER_MAX_BATCH, &max_batch)?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        Ok(self)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| MediaError::Config(format!("Server config error: {}", e)))?;

        self.storage
            .validate()
            .map_err(|e| MediaError::Config(format!("Storage config error: {}", e)))?;

        self.loaders
            .validate()
            .map_err(|e| MediaError::Config(format!("Loader config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| MediaError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| MediaError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MediaError::Config(format!("Invalid value for {}: {:?}", name, value)))
}
