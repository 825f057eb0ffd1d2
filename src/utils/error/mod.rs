//! Error handling for the media server
//!
//! This module defines the crate-wide error type, its constructor helpers and
//! the HTTP response mapping used by the actix handlers.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{MediaError, Result};
