//! Core functionality
//!
//! Domain models, the batching loader engine, the per-request loader
//! registry, and the resolvers built on top of them.

pub mod loader;
pub mod models;
pub mod registry;
pub mod resolvers;
