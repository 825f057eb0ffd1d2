//! Configuration validation
//!
//! Every configuration section implements [`Validate`]; errors are plain
//! messages that [`crate::config::Config::validate`] wraps into config errors.

mod trait_def;
mod validators;

pub use trait_def::Validate;
