//! Utility modules for the media server
//!
//! - **error**: the crate error type and its HTTP mapping
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

pub use logging::init_logging;
