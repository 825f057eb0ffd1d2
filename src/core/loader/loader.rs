//! Batching, caching loader
//!
//! Callers register interest in single keys. Keys registered while a batch is
//! open join that batch; the batch is dispatched once, either when its wait
//! window elapses or as soon as it reaches the configured size. Successful
//! results are cached for the lifetime of the loader, failures never are.

use super::batch::{BatchCompleter, Completion, OpenBatch, Settled};
use super::fetch::{FetchAdapter, FetchOutput, fetch_fn};
use super::types::{LoaderConfig, LoaderError};
use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounds shared by every loader key
pub trait LoaderKey: Eq + Hash + Clone + Send + Sync + 'static {}

impl<T> LoaderKey for T where T: Eq + Hash + Clone + Send + Sync + 'static {}

/// Bounds shared by every loader value
pub trait LoaderValue: Clone + Send + Sync + 'static {}

impl<T> LoaderValue for T where T: Clone + Send + Sync + 'static {}

/// Batching, caching loader for one key/value relationship
///
/// Cloning is cheap and yields a handle to the same cache and batch.
/// Registering a key spawns Tokio tasks, so loaders must be used from
/// within a Tokio runtime.
pub struct BatchLoader<K, V> {
    shared: Arc<LoaderShared<K, V>>,
}

impl<K, V> Clone for BatchLoader<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct LoaderShared<K, V> {
    name: String,
    fetch: Arc<dyn FetchAdapter<K, V>>,
    config: LoaderConfig,
    state: Mutex<LoaderState<K, V>>,
}

struct LoaderState<K, V> {
    cache: HashMap<K, V>,
    batch: Option<OpenBatch<K, V>>,
    batches: u64,
}

impl<K: LoaderKey, V: LoaderValue> BatchLoader<K, V> {
    /// Create a loader from a fetch adapter
    pub fn new(
        name: impl Into<String>,
        fetch: Arc<dyn FetchAdapter<K, V>>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            shared: Arc::new(LoaderShared {
                name: name.into(),
                fetch,
                config,
                state: Mutex::new(LoaderState {
                    cache: HashMap::new(),
                    batch: None,
                    batches: 0,
                }),
            }),
        }
    }

    /// Start building a loader
    pub fn builder(name: impl Into<String>) -> BatchLoaderBuilder<K, V> {
        BatchLoaderBuilder::new(name)
    }

    /// Loader name used in logs
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Batching parameters
    pub fn config(&self) -> LoaderConfig {
        self.shared.config
    }

    /// Load a single key
    ///
    /// Returns immediately on a cache hit, otherwise waits for the batch the
    /// key joined to be dispatched and settled.
    pub async fn load(&self, key: K) -> Result<V, LoaderError> {
        self.enqueue(key).wait().await
    }

    /// Load several keys, returning one result per key in input order
    ///
    /// Every key is registered before any result is awaited, so keys land in
    /// the same batch unless the size threshold splits them.
    pub async fn load_many<I>(&self, keys: I) -> Vec<Result<V, LoaderError>>
    where
        I: IntoIterator<Item = K>,
    {
        let pending: Vec<Pending<K, V>> = keys.into_iter().map(|key| self.enqueue(key)).collect();
        join_all(pending.into_iter().map(Pending::wait)).await
    }

    /// Load several keys, failing with the first error encountered
    pub async fn try_load_many<I>(&self, keys: I) -> Result<Vec<V>, LoaderError>
    where
        I: IntoIterator<Item = K>,
    {
        self.load_many(keys).await.into_iter().collect()
    }

    /// Register a key without waiting for it
    ///
    /// The key joins the open batch (or opens one) as soon as this returns;
    /// the value is delivered by [`Pending::wait`].
    pub fn enqueue(&self, key: K) -> Pending<K, V> {
        let mut guard = self.shared.state.lock();
        let state = &mut *guard;

        if let Some(value) = state.cache.get(&key) {
            return Pending {
                state: PendingState::Ready(value.clone()),
            };
        }

        if state.batch.is_none() {
            state.batches += 1;
            debug!(loader = %self.shared.name, batch = state.batches, "opening batch");
            state.batch = Some(OpenBatch::new(state.batches));
        }

        let Some(batch) = state.batch.as_mut() else {
            return Pending {
                state: PendingState::Failed(LoaderError::Abandoned),
            };
        };

        let (index, appended) = batch.slot(key.clone());
        let done = batch.subscribe();
        let batch_id = batch.id;
        let full = self.shared.config.is_full(batch.len());

        if appended && batch.len() == 1 && !full {
            self.shared.schedule_window(batch_id);
        }

        let detached = if full {
            debug!(
                loader = %self.shared.name,
                batch = batch_id,
                keys = batch.len(),
                "batch reached size threshold"
            );
            state.batch.take()
        } else {
            None
        };
        drop(guard);

        if let Some(batch) = detached {
            let shared = Arc::clone(&self.shared);
            tokio::spawn(async move { shared.dispatch(batch).await });
        }

        Pending {
            state: PendingState::Waiting {
                loader: Arc::clone(&self.shared),
                key,
                index,
                done,
            },
        }
    }

    /// Seed the cache with a value
    ///
    /// Returns `false` and leaves the cache untouched when the key is already
    /// present.
    pub fn prime(&self, key: K, value: V) -> bool {
        match self.shared.state.lock().cache.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    /// Remove a cached value so the next load fetches it again
    pub fn clear(&self, key: &K) {
        self.shared.state.lock().cache.remove(key);
    }

    /// Remove every cached value
    pub fn clear_all(&self) {
        self.shared.state.lock().cache.clear();
    }

    /// Number of cached values
    pub fn cached_len(&self) -> usize {
        self.shared.state.lock().cache.len()
    }
}

impl<K: LoaderKey, V: LoaderValue> LoaderShared<K, V> {
    /// Close batch `id` once the wait window elapses, unless it already closed
    fn schedule_window(self: &Arc<Self>, id: u64) {
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(shared.config.wait).await;

            let batch = {
                let mut state = shared.state.lock();
                if state.batch.as_ref().is_some_and(|batch| batch.id == id) {
                    state.batch.take()
                } else {
                    None
                }
            };

            if let Some(batch) = batch {
                shared.dispatch(batch).await;
            }
        });
    }

    /// Fetch a detached batch and publish its outcome
    async fn dispatch(&self, batch: OpenBatch<K, V>) {
        let (keys, completer) = batch.close();
        debug!(
            loader = %self.name,
            batch = completer.id,
            keys = keys.len(),
            "dispatching batch"
        );

        let output = self.fetch.fetch(&keys).await;
        self.settle(keys.len(), output, completer);
    }

    fn settle(&self, keys: usize, output: FetchOutput<V>, completer: BatchCompleter<V>) {
        let settled = Settled::settle(output, keys);
        if let Settled::Failed(error @ LoaderError::BatchIntegrity { .. }) = &settled {
            warn!(loader = %self.name, batch = completer.id, error = %error, "malformed fetch output");
        } else if settled.is_failed() {
            debug!(loader = %self.name, batch = completer.id, "batch fetch failed");
        }
        completer.complete(settled);
    }

    /// Cache a successful result; the first write for a key wins
    fn store(&self, key: K, value: V) {
        self.state.lock().cache.entry(key).or_insert(value);
    }
}

/// A registered key awaiting its batch
pub struct Pending<K, V> {
    state: PendingState<K, V>,
}

enum PendingState<K, V> {
    Ready(V),
    Failed(LoaderError),
    Waiting {
        loader: Arc<LoaderShared<K, V>>,
        key: K,
        index: usize,
        done: Completion<V>,
    },
}

impl<K: LoaderKey, V: LoaderValue> Pending<K, V> {
    /// Whether the value was served from the cache
    pub fn is_ready(&self) -> bool {
        matches!(self.state, PendingState::Ready(_))
    }

    /// Wait for the batch and return this key's result
    pub async fn wait(self) -> Result<V, LoaderError> {
        let (loader, key, index, mut done) = match self.state {
            PendingState::Ready(value) => return Ok(value),
            PendingState::Failed(error) => return Err(error),
            PendingState::Waiting {
                loader,
                key,
                index,
                done,
            } => (loader, key, index, done),
        };

        let settled = {
            match done.wait_for(Option::is_some).await {
                Ok(current) => current.as_ref().map(Arc::clone),
                Err(_) => None,
            }
        };
        let settled = settled.ok_or(LoaderError::Abandoned)?;

        let result = settled.get(index);
        if let Ok(value) = &result {
            loader.store(key, value.clone());
        }
        result
    }
}

/// Builder for [`BatchLoader`]
pub struct BatchLoaderBuilder<K, V> {
    name: String,
    fetch: Option<Arc<dyn FetchAdapter<K, V>>>,
    config: LoaderConfig,
}

impl<K: LoaderKey, V: LoaderValue> BatchLoaderBuilder<K, V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fetch: None,
            config: LoaderConfig::default(),
        }
    }

    /// Set the fetch adapter
    pub fn fetch(mut self, fetch: Arc<dyn FetchAdapter<K, V>>) -> Self {
        self.fetch = Some(fetch);
        self
    }

    /// Set the fetch adapter from an async closure over the batch keys
    pub fn fetch_with<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Vec<K>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FetchOutput<V>> + Send + 'static,
    {
        self.fetch(Arc::new(fetch_fn(f)))
    }

    /// Set every batching parameter at once
    pub fn config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn wait(mut self, wait: Duration) -> Self {
        self.config.wait = wait;
        self
    }

    pub fn max_batch(mut self, max_batch: usize) -> Self {
        self.config.max_batch = max_batch;
        self
    }

    /// Build the loader, failing if no fetch adapter was set
    pub fn build(self) -> Result<BatchLoader<K, V>, LoaderError> {
        let fetch = self.fetch.ok_or(LoaderError::MissingFetch(self.name.clone()))?;
        Ok(BatchLoader::new(self.name, fetch, self.config))
    }
}
