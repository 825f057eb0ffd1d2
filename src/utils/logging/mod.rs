//! Logging setup
//!
//! Installs a `tracing` subscriber driven by [`LoggingConfig`]. A `RUST_LOG`
//! environment variable takes precedence over the configured level. Records
//! emitted through the `log` facade, such as actix-web's access log, are
//! forwarded into the same subscriber.

use crate::config::LoggingConfig;
use crate::utils::error::{MediaError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// Fails when the filter is malformed or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level, std::env::var(EnvFilter::DEFAULT_ENV).ok())?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| MediaError::config(format!("Failed to initialize logging: {}", e)))
}

/// Filter from `env_directives` when set and non-empty, otherwise from `level`
pub fn build_filter(level: &str, env_directives: Option<String>) -> Result<EnvFilter> {
    let directives = env_directives
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| level.to_string());

    EnvFilter::try_new(&directives)
        .map_err(|e| MediaError::config(format!("Invalid log filter '{}': {}", directives, e)))
}
