//! Validators for each configuration section

use super::trait_def::Validate;
use crate::config::models::*;
use crate::core::registry::LOADER_NAMES;
use tracing::debug;

/// Upper bound on a batching window; longer windows only add latency
const MAX_WAIT_MS: u64 = 10_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating server configuration");

        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if self.workers == Some(0) {
            return Err("Server workers must be greater than 0".to_string());
        }

        if self.timeout == 0 {
            return Err("Server timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating storage configuration");
        self.database.validate()
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        if !self.is_sqlite() && !self.is_postgres() {
            return Err("Only SQLite and PostgreSQL databases are supported".to_string());
        }

        if self.max_connections == 0 {
            return Err("Database max connections must be greater than 0".to_string());
        }

        if self.max_connections > 1000 {
            return Err("Database max connections should not exceed 1000".to_string());
        }

        if self.connection_timeout == 0 {
            return Err("Database connection timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for LoaderSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating loader settings");

        if self.wait_ms > MAX_WAIT_MS {
            return Err(format!(
                "Loader wait_ms should not exceed {MAX_WAIT_MS}, got {}",
                self.wait_ms
            ));
        }

        for (name, tuning) in &self.overrides {
            if !LOADER_NAMES.contains(&name.as_str()) {
                return Err(format!("Unknown loader in overrides: {name}"));
            }
            if tuning.wait_ms.is_some_and(|wait| wait > MAX_WAIT_MS) {
                return Err(format!(
                    "Loader {name} wait_ms should not exceed {MAX_WAIT_MS}"
                ));
            }
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        // Plain levels are checked here, full directives are left to the filter parser
        if !self.level.contains('=') && !LOG_LEVELS.contains(&self.level.to_lowercase().as_str())
        {
            return Err(format!(
                "Unknown log level: {}. Expected one of {:?}",
                self.level, LOG_LEVELS
            ));
        }

        Ok(())
    }
}
