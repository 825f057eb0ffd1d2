//! Batch bookkeeping
//!
//! A batch is open while it is attached to its loader and accepting keys,
//! closing once detached with its fetch in flight, and done when the settled
//! outcome has been published on its completion signal.

use super::fetch::FetchOutput;
use super::types::LoaderError;
use std::sync::Arc;
use tokio::sync::watch;

/// Completion signal shared by every caller of one batch
pub(crate) type Completion<V> = watch::Receiver<Option<Arc<Settled<V>>>>;

/// A batch that is still attached to its loader
pub(crate) struct OpenBatch<K, V> {
    pub(crate) id: u64,
    pub(crate) keys: Vec<K>,
    signal: watch::Sender<Option<Arc<Settled<V>>>>,
}

impl<K: PartialEq, V> OpenBatch<K, V> {
    pub(crate) fn new(id: u64) -> Self {
        let (signal, _) = watch::channel(None);
        Self {
            id,
            keys: Vec::new(),
            signal,
        }
    }

    /// Index of `key` in this batch, appending it when absent
    ///
    /// Returns the index and whether the key was appended.
    pub(crate) fn slot(&mut self, key: K) -> (usize, bool) {
        match self.keys.iter().position(|k| *k == key) {
            Some(index) => (index, false),
            None => {
                self.keys.push(key);
                (self.keys.len() - 1, true)
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn subscribe(&self) -> Completion<V> {
        self.signal.subscribe()
    }

    /// Detach the batch into its keys and the handle that completes it
    pub(crate) fn close(self) -> (Vec<K>, BatchCompleter<V>) {
        (
            self.keys,
            BatchCompleter {
                id: self.id,
                signal: self.signal,
            },
        )
    }
}

/// Publishes the settled outcome of a closed batch exactly once
pub(crate) struct BatchCompleter<V> {
    pub(crate) id: u64,
    signal: watch::Sender<Option<Arc<Settled<V>>>>,
}

impl<V> BatchCompleter<V> {
    pub(crate) fn complete(self, settled: Settled<V>) {
        self.signal.send_replace(Some(Arc::new(settled)));
    }
}

/// Outcome of a batch, aligned to its keys
#[derive(Debug)]
pub(crate) enum Settled<V> {
    Values(Vec<V>),
    PerKey(Vec<Result<V, LoaderError>>),
    Failed(LoaderError),
}

impl<V: Clone> Settled<V> {
    /// Validate adapter output against the number of keys it was asked for
    pub(crate) fn settle(output: FetchOutput<V>, keys: usize) -> Self {
        match output {
            FetchOutput::Values(values) if values.len() == keys => Self::Values(values),
            FetchOutput::Values(values) => Self::Failed(LoaderError::BatchIntegrity {
                keys,
                values: values.len(),
                errors: 0,
            }),
            FetchOutput::PerKey(results) if results.len() == keys => Self::PerKey(
                results
                    .into_iter()
                    .map(|result| result.map_err(LoaderError::fetch))
                    .collect(),
            ),
            FetchOutput::PerKey(results) => Self::Failed(LoaderError::BatchIntegrity {
                keys,
                values: results.len(),
                errors: results.len(),
            }),
            FetchOutput::Failed(error) => Self::Failed(LoaderError::fetch(error)),
            FetchOutput::Mismatched { values, errors } => {
                Self::Failed(LoaderError::BatchIntegrity {
                    keys,
                    values,
                    errors,
                })
            }
        }
    }

    /// Result for the key at `index`
    pub(crate) fn get(&self, index: usize) -> Result<V, LoaderError> {
        match self {
            Self::Values(values) => values.get(index).cloned().ok_or(LoaderError::BatchIntegrity {
                keys: index + 1,
                values: values.len(),
                errors: 0,
            }),
            Self::PerKey(results) => {
                results
                    .get(index)
                    .cloned()
                    .unwrap_or(Err(LoaderError::BatchIntegrity {
                        keys: index + 1,
                        values: results.len(),
                        errors: results.len(),
                    }))
            }
            Self::Failed(error) => Err(error.clone()),
        }
    }

    pub(crate) fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
