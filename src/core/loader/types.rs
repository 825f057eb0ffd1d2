//! Loader configuration and error types

use crate::utils::error::MediaError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default time a batch stays open after its first key arrives
pub const DEFAULT_WAIT: Duration = Duration::from_millis(1);

/// Default maximum number of keys dispatched in one fetch
pub const DEFAULT_MAX_BATCH: usize = 100;

/// Batching parameters for a single loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// How long a batch collects keys before it is dispatched
    pub wait: Duration,
    /// Size at which a batch is dispatched early (0 = unbounded)
    pub max_batch: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            wait: DEFAULT_WAIT,
            max_batch: DEFAULT_MAX_BATCH,
        }
    }
}

impl LoaderConfig {
    /// Create a new config with the default window and size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batching window
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Set the maximum batch size (0 disables the size threshold)
    pub fn with_max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = max_batch;
        self
    }

    /// Whether a batch holding `len` keys must be dispatched immediately
    pub fn is_full(&self, len: usize) -> bool {
        self.max_batch != 0 && len >= self.max_batch
    }
}

/// Error delivered to a caller of [`super::BatchLoader::load`]
///
/// Cloneable so one failure can be handed to every caller that joined the
/// batch. A fetch error is shared through an `Arc`, so all callers of a
/// uniformly failed batch observe the same underlying error value.
#[derive(Error, Debug, Clone)]
pub enum LoaderError {
    /// The fetch adapter reported a failure
    #[error(transparent)]
    Fetch(Arc<MediaError>),

    /// The fetch adapter returned output that cannot be aligned with its keys
    #[error("batch output does not match its keys: {keys} keys, {values} values, {errors} errors")]
    BatchIntegrity {
        keys: usize,
        values: usize,
        errors: usize,
    },

    /// The dispatch task ended without delivering results
    #[error("batch dispatch ended before results were delivered")]
    Abandoned,

    /// A loader was built without a fetch adapter
    #[error("loader '{0}' has no fetch adapter")]
    MissingFetch(String),
}

impl LoaderError {
    /// Wrap a fetch failure
    pub fn fetch(error: MediaError) -> Self {
        Self::Fetch(Arc::new(error))
    }

    /// The adapter error behind this failure, if any
    pub fn fetch_error(&self) -> Option<&MediaError> {
        match self {
            Self::Fetch(inner) => Some(inner),
            _ => None,
        }
    }

    /// Whether both errors are the same shared fetch failure
    pub fn same_fetch(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fetch(a), Self::Fetch(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
