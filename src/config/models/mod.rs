//! Configuration data models

pub mod loaders;
pub mod logging;
pub mod server;
pub mod storage;

pub use loaders::*;
pub use logging::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    9999
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub fn default_database_url() -> String {
    "sqlite://mediagraph.db?mode=rwc".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_run_migrations() -> bool {
    true
}

/// Default batching window in milliseconds
pub fn default_wait_ms() -> u64 {
    1
}

pub fn default_max_batch() -> usize {
    100
}

pub fn default_log_level() -> String {
    "info".to_string()
}
