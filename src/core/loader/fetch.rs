//! Fetch adapter contract
//!
//! A fetch adapter bridges a [`super::BatchLoader`] to the data source of one
//! relationship. It receives the deduplicated keys of a batch, in arrival
//! order, and answers with output positionally aligned to those keys.

use crate::utils::error::{MediaError, Result};
use async_trait::async_trait;
use std::future::Future;

/// Output of one batched fetch
#[derive(Debug)]
pub enum FetchOutput<V> {
    /// One value per key, no errors
    Values(Vec<V>),
    /// One outcome per key
    PerKey(Vec<std::result::Result<V, MediaError>>),
    /// A single failure applying to every key of the batch
    Failed(MediaError),
    /// Parallel value and error sequences whose lengths could not be aligned
    Mismatched { values: usize, errors: usize },
}

impl<V> FetchOutput<V> {
    /// Normalize a repository call that fails as a whole
    pub fn from_result(result: Result<Vec<V>>) -> Self {
        match result {
            Ok(values) => Self::Values(values),
            Err(error) => Self::Failed(error),
        }
    }

    /// Normalize parallel value and error sequences
    ///
    /// `errors` follows the count convention of the data source: empty means
    /// success, a single entry applies to every key, otherwise there is one
    /// entry per value.
    pub fn from_parts(values: Vec<V>, mut errors: Vec<Option<MediaError>>) -> Self {
        match errors.len() {
            0 => Self::Values(values),
            1 => match errors.pop().flatten() {
                Some(error) => Self::Failed(error),
                None => Self::Values(values),
            },
            n if n == values.len() => Self::PerKey(
                values
                    .into_iter()
                    .zip(errors)
                    .map(|(value, error)| match error {
                        Some(error) => Err(error),
                        None => Ok(value),
                    })
                    .collect(),
            ),
            n => Self::Mismatched {
                values: values.len(),
                errors: n,
            },
        }
    }

    /// Number of per-key entries carried by this output
    pub fn len(&self) -> usize {
        match self {
            Self::Values(values) => values.len(),
            Self::PerKey(results) => results.len(),
            Self::Failed(_) | Self::Mismatched { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Batched lookup for one relationship
#[async_trait]
pub trait FetchAdapter<K, V>: Send + Sync {
    /// Fetch every key of a batch in a single call
    async fn fetch(&self, keys: &[K]) -> FetchOutput<V>;
}

/// Fetch adapter backed by an async closure
pub struct FnFetch<F> {
    f: F,
}

/// Wrap an async closure taking the batch keys as a fetch adapter
pub fn fetch_fn<F>(f: F) -> FnFetch<F> {
    FnFetch { f }
}

#[async_trait]
impl<K, V, F, Fut> FetchAdapter<K, V> for FnFetch<F>
where
    K: Clone + Send + Sync + 'static,
    V: Send + 'static,
    F: Fn(Vec<K>) -> Fut + Send + Sync,
    Fut: Future<Output = FetchOutput<V>> + Send,
{
    async fn fetch(&self, keys: &[K]) -> FetchOutput<V> {
        (self.f)(keys.to_vec()).await
    }
}
