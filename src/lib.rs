//! # mediagraph
//!
//! Read API for a media library whose relationship lookups are batched and
//! cached per request.
//!
//! Resolving a list of scenes touches many relationships: studio, performers,
//! tags, files, play counters. Fetched naively, that is one query per scene
//! per relationship. Every request here instead gets its own
//! [`LoaderRegistry`], a set of [`BatchLoader`]s that collect the keys asked
//! for within a short window and fetch them with a single repository call.
//!
//! ## Features
//!
//! - **Batching**: concurrent lookups of one relationship collapse into one fetch
//! - **Per-request caching**: repeated lookups within a request are free
//! - **Isolation**: registries are never shared between requests
//! - **Pluggable storage**: SeaORM (SQLite or PostgreSQL) or in-memory
//!
//! ## Example
//!
//! ```rust,no_run
//! use mediagraph::{Config, LoaderRegistry, resolve_scenes};
//! use mediagraph::storage::SeaOrmRepository;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let repository = SeaOrmRepository::connect(&config.storage.database).await?;
//!     repository.migrate().await?;
//!
//!     let loaders = LoaderRegistry::new(Arc::new(repository), &config.loaders);
//!     for scene in resolve_scenes(&loaders, vec![1, 2, 3]).await?.into_iter().flatten() {
//!         println!("{:?} has {} performers", scene.scene.title, scene.performers.len());
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::loader::{BatchLoader, FetchAdapter, FetchOutput, LoaderConfig, LoaderError};
pub use core::registry::LoaderRegistry;
pub use core::resolvers::{SceneView, resolve_scene, resolve_scenes};
pub use storage::{InMemoryRepository, MediaRepository, SeaOrmRepository};
pub use utils::error::{MediaError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
