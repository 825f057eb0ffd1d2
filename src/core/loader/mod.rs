//! Per-request batching and caching loader
//!
//! Resolvers ask a [`BatchLoader`] for single keys; the loader coalesces the
//! keys requested within a short window into one call to the relationship's
//! [`FetchAdapter`] and fans the results back out to every caller. Successful
//! results are cached for the lifetime of the loader, which is one request.
//!
//! ```rust,ignore
//! use mediagraph::core::loader::{BatchLoader, FetchOutput};
//!
//! let loader = BatchLoader::builder("tag_by_id")
//!     .fetch_with(|ids: Vec<i32>| async move {
//!         FetchOutput::from_result(repository.find_tags(&ids).await)
//!     })
//!     .build()?;
//!
//! let (a, b) = tokio::join!(loader.load(1), loader.load(2)); // one fetch
//! ```

mod batch;
mod fetch;
mod loader;
mod types;

pub use fetch::{FetchAdapter, FetchOutput, FnFetch, fetch_fn};
pub use loader::{BatchLoader, BatchLoaderBuilder, LoaderKey, LoaderValue, Pending};
pub use types::{DEFAULT_MAX_BATCH, DEFAULT_WAIT, LoaderConfig, LoaderError};

#[cfg(test)]
mod tests;
