//! Error types for the media server

use thiserror::Error;

/// Result type alias for the media server
pub type Result<T> = std::result::Result<T, MediaError>;

/// Main error type for the media server
#[derive(Error, Debug)]
pub enum MediaError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Relationship loading errors
    #[error("Loader error: {0}")]
    Loader(#[from] crate::core::loader::LoaderError),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
