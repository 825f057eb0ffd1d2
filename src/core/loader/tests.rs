//! Tests for the batching loader

use super::*;
use crate::utils::error::MediaError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

type Calls = Arc<Mutex<Vec<Vec<u32>>>>;

fn value_for(key: u32) -> String {
    format!("value-{}", key)
}

/// Loader answering every key with `value-<key>` and recording each fetch
fn recording_loader(config: LoaderConfig) -> (BatchLoader<u32, String>, Calls) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&calls);
    let loader = BatchLoader::builder("recording")
        .config(config)
        .fetch_with(move |keys: Vec<u32>| {
            let seen = Arc::clone(&seen);
            async move {
                seen.lock().push(keys.clone());
                FetchOutput::Values(keys.into_iter().map(value_for).collect())
            }
        })
        .build()
        .unwrap();
    (loader, calls)
}

fn failing_loader(config: LoaderConfig) -> (BatchLoader<u32, String>, Calls) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&calls);
    let loader = BatchLoader::builder("failing")
        .config(config)
        .fetch_with(move |keys: Vec<u32>| {
            let seen = Arc::clone(&seen);
            async move {
                seen.lock().push(keys);
                FetchOutput::Failed(MediaError::internal("database unavailable"))
            }
        })
        .build()
        .unwrap();
    (loader, calls)
}

fn window(ms: u64) -> LoaderConfig {
    LoaderConfig::new().with_wait(Duration::from_millis(ms))
}

// ==================== Batching ====================

#[tokio::test]
async fn test_concurrent_keys_share_one_fetch() {
    let (loader, calls) = recording_loader(window(10));

    let (a, b, c, d) = tokio::join!(
        loader.load(1),
        loader.load(2),
        loader.load(1),
        loader.load(3)
    );

    assert_eq!(a.unwrap(), "value-1");
    assert_eq!(b.unwrap(), "value-2");
    assert_eq!(c.unwrap(), "value-1");
    assert_eq!(d.unwrap(), "value-3");

    let calls = calls.lock();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], vec![1, 2, 3]);
}

#[tokio::test]
async fn test_same_key_joins_existing_slot() {
    let (loader, calls) = recording_loader(window(5));

    let (first, second) = tokio::join!(loader.load(42), loader.load(42));

    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(*calls.lock(), vec![vec![42]]);
}

#[tokio::test(start_paused = true)]
async fn test_size_threshold_splits_batches() {
    let (loader, calls) = recording_loader(window(1).with_max_batch(100));

    let handles: Vec<_> = (0..150u32)
        .map(|key| {
            let loader = loader.clone();
            tokio::spawn(async move { loader.load(key).await })
        })
        .collect();

    for (key, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap().unwrap(), value_for(key as u32));
    }

    let sizes: Vec<usize> = calls.lock().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![100, 50]);
}

#[tokio::test]
async fn test_batches_never_exceed_max_batch() {
    let (loader, calls) = recording_loader(window(5).with_max_batch(10));

    let results = loader.load_many(0..25u32).await;
    assert!(results.iter().all(Result::is_ok));

    let calls = calls.lock();
    assert!(calls.iter().all(|keys| keys.len() <= 10));
    let total: usize = calls.iter().map(Vec::len).sum();
    assert_eq!(total, 25);
}

#[tokio::test]
async fn test_unbounded_batch_when_max_is_zero() {
    let (loader, calls) = recording_loader(window(5).with_max_batch(0));

    let values = loader.try_load_many(0..500u32).await.unwrap();

    assert_eq!(values.len(), 500);
    assert_eq!(values[499], "value-499");
    assert_eq!(calls.lock().len(), 1);
}

#[tokio::test]
async fn test_keys_after_close_open_new_batch() {
    let (loader, calls) = recording_loader(window(1));

    loader.load(1).await.unwrap();
    loader.load(2).await.unwrap();

    assert_eq!(*calls.lock(), vec![vec![1], vec![2]]);
}

#[tokio::test]
async fn test_load_many_preserves_input_order() {
    let (loader, _calls) = recording_loader(window(5));

    let values = loader.try_load_many(vec![9, 3, 9, 1]).await.unwrap();

    assert_eq!(values, vec!["value-9", "value-3", "value-9", "value-1"]);
}

#[tokio::test]
async fn test_fetch_runs_outside_lock() {
    let release = Arc::new(Notify::new());
    let gate = Arc::clone(&release);
    let fetches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fetches);

    let loader: BatchLoader<u32, u32> = BatchLoader::builder("gated")
        .config(LoaderConfig::new().with_max_batch(1))
        .fetch_with(move |keys: Vec<u32>| {
            let gate = Arc::clone(&gate);
            let call = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    gate.notified().await;
                }
                FetchOutput::Values(keys)
            }
        })
        .build()
        .unwrap();

    let slow = tokio::spawn({
        let loader = loader.clone();
        async move { loader.load(1).await }
    });
    while fetches.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }

    // The first fetch is still blocked; a new key must still register and resolve.
    assert_eq!(loader.load(2).await.unwrap(), 2);

    release.notify_one();
    assert_eq!(slow.await.unwrap().unwrap(), 1);
}

// ==================== Caching ====================

#[tokio::test]
async fn test_cache_hit_skips_fetch() {
    let (loader, calls) = recording_loader(window(1));

    assert_eq!(loader.load(5).await.unwrap(), "value-5");
    for _ in 0..3 {
        let pending = loader.enqueue(5);
        assert!(pending.is_ready());
        assert_eq!(pending.wait().await.unwrap(), "value-5");
    }

    assert_eq!(calls.lock().len(), 1);
    assert_eq!(loader.cached_len(), 1);
}

#[tokio::test]
async fn test_clear_forces_refetch() {
    let (loader, calls) = recording_loader(window(1));

    loader.load(5).await.unwrap();
    loader.clear(&5);
    assert_eq!(loader.cached_len(), 0);
    loader.load(5).await.unwrap();

    assert_eq!(*calls.lock(), vec![vec![5], vec![5]]);
}

#[tokio::test]
async fn test_clear_all_empties_cache() {
    let (loader, calls) = recording_loader(window(1));

    loader.try_load_many(vec![1, 2, 3]).await.unwrap();
    assert_eq!(loader.cached_len(), 3);

    loader.clear_all();
    assert_eq!(loader.cached_len(), 0);
    loader.load(2).await.unwrap();
    assert_eq!(calls.lock().len(), 2);
}

#[tokio::test]
async fn test_prime_first_write_wins() {
    let (loader, calls) = recording_loader(window(1));

    assert!(loader.prime(8, "primed".to_string()));
    assert!(!loader.prime(8, "second".to_string()));

    assert_eq!(loader.load(8).await.unwrap(), "primed");
    assert!(calls.lock().is_empty());
}

#[tokio::test]
async fn test_prime_does_not_overwrite_loaded_value() {
    let (loader, _calls) = recording_loader(window(1));

    loader.load(3).await.unwrap();
    assert!(!loader.prime(3, "other".to_string()));
    assert_eq!(loader.load(3).await.unwrap(), "value-3");
}

#[tokio::test]
async fn test_prime_during_in_flight_batch_keeps_primed_value() {
    let (loader, calls) = recording_loader(window(5));

    let pending = loader.enqueue(3);
    assert!(!pending.is_ready());
    assert!(loader.prime(3, "primed".to_string()));

    // The waiter still sees its batch's result, the cache keeps the first write
    assert_eq!(pending.wait().await.unwrap(), "value-3");
    assert_eq!(loader.load(3).await.unwrap(), "primed");
    assert_eq!(loader.cached_len(), 1);
    assert_eq!(*calls.lock(), vec![vec![3]]);
}

// ==================== Errors ====================

#[tokio::test]
async fn test_uniform_error_reaches_every_caller() {
    let (loader, calls) = failing_loader(window(5));

    let results = loader.load_many(1..=5u32).await;

    assert_eq!(results.len(), 5);
    let first = results[0].as_ref().unwrap_err();
    for result in &results {
        let error = result.as_ref().unwrap_err();
        assert!(error.same_fetch(first));
        assert_eq!(error.to_string(), "Internal server error: database unavailable");
    }
    assert_eq!(calls.lock().len(), 1);
    assert_eq!(loader.cached_len(), 0);
}

#[tokio::test]
async fn test_failed_key_is_retried_by_next_load() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let loader: BatchLoader<u32, String> = BatchLoader::builder("flaky")
        .wait(Duration::from_millis(1))
        .fetch_with(move |keys: Vec<u32>| {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    FetchOutput::Failed(MediaError::internal("transient"))
                } else {
                    FetchOutput::Values(keys.into_iter().map(value_for).collect())
                }
            }
        })
        .build()
        .unwrap();

    assert!(loader.load(7).await.is_err());
    assert_eq!(loader.cached_len(), 0);

    assert_eq!(loader.load(7).await.unwrap(), "value-7");
    assert_eq!(loader.cached_len(), 1);

    assert_eq!(loader.load(7).await.unwrap(), "value-7");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_per_key_errors_only_fail_their_key() {
    let loader: BatchLoader<u32, u32> = BatchLoader::builder("per_key")
        .wait(Duration::from_millis(5))
        .fetch_with(|keys: Vec<u32>| async move {
            FetchOutput::PerKey(
                keys.into_iter()
                    .map(|key| {
                        if key % 2 == 0 {
                            Ok(key * 10)
                        } else {
                            Err(MediaError::not_found(format!("key {}", key)))
                        }
                    })
                    .collect(),
            )
        })
        .build()
        .unwrap();

    let results = loader.load_many(vec![1, 2, 3, 4]).await;

    assert!(results[0].is_err());
    assert_eq!(*results[1].as_ref().unwrap(), 20);
    assert!(results[2].is_err());
    assert_eq!(*results[3].as_ref().unwrap(), 40);
    assert_eq!(loader.cached_len(), 2);
}

#[tokio::test]
async fn test_parallel_parts_follow_error_count_convention() {
    let loader: BatchLoader<u32, u32> = BatchLoader::builder("parts")
        .wait(Duration::from_millis(5))
        .fetch_with(|keys: Vec<u32>| async move {
            let errors = keys
                .iter()
                .map(|key| (*key == 2).then(|| MediaError::not_found("two")))
                .collect();
            FetchOutput::from_parts(keys, errors)
        })
        .build()
        .unwrap();

    let results = loader.load_many(vec![1, 2, 3]).await;

    assert_eq!(*results[0].as_ref().unwrap(), 1);
    assert!(matches!(
        results[1].as_ref().unwrap_err().fetch_error(),
        Some(MediaError::NotFound(_))
    ));
    assert_eq!(*results[2].as_ref().unwrap(), 3);
}

#[tokio::test]
async fn test_malformed_output_is_integrity_error() {
    let loader: BatchLoader<u32, u32> = BatchLoader::builder("short")
        .wait(Duration::from_millis(5))
        .fetch_with(|keys: Vec<u32>| async move {
            FetchOutput::Values(keys.into_iter().skip(1).collect())
        })
        .build()
        .unwrap();

    let results = loader.load_many(vec![1, 2, 3]).await;

    for result in results {
        assert!(matches!(
            result,
            Err(LoaderError::BatchIntegrity {
                keys: 3,
                values: 2,
                errors: 0
            })
        ));
    }
    assert_eq!(loader.cached_len(), 0);
}

#[tokio::test]
async fn test_mismatched_parts_are_integrity_error() {
    let loader: BatchLoader<u32, u32> = BatchLoader::builder("mismatched")
        .wait(Duration::from_millis(5))
        .fetch_with(|keys: Vec<u32>| async move {
            FetchOutput::from_parts(keys, vec![None, None])
        })
        .build()
        .unwrap();

    let results = loader.load_many(vec![1, 2, 3]).await;

    assert!(results.iter().all(|result| matches!(
        result,
        Err(LoaderError::BatchIntegrity { errors: 2, .. })
    )));
}

#[tokio::test]
async fn test_panicking_adapter_abandons_waiters() {
    let loader: BatchLoader<u32, u32> = BatchLoader::builder("panics")
        .wait(Duration::from_millis(1))
        .fetch(Arc::new(PanickingFetch))
        .build()
        .unwrap();

    let result = loader.load(1).await;
    assert!(matches!(result, Err(LoaderError::Abandoned)));
}

#[test]
fn test_builder_requires_fetch() {
    let result = BatchLoader::<u32, u32>::builder("unwired").build();
    assert!(matches!(result, Err(LoaderError::MissingFetch(name)) if name == "unwired"));
}

#[test]
fn test_config_builder() {
    let config = LoaderConfig::new()
        .with_wait(Duration::from_millis(20))
        .with_max_batch(7);

    assert_eq!(config.wait, Duration::from_millis(20));
    assert_eq!(config.max_batch, 7);
    assert!(config.is_full(7));
    assert!(!config.is_full(6));
    assert!(!LoaderConfig::new().with_max_batch(0).is_full(10_000));
}

#[test]
fn test_default_config() {
    let config = LoaderConfig::default();
    assert_eq!(config.wait, DEFAULT_WAIT);
    assert_eq!(config.max_batch, DEFAULT_MAX_BATCH);
}

struct PanickingFetch;

#[async_trait]
impl FetchAdapter<u32, u32> for PanickingFetch {
    async fn fetch(&self, _keys: &[u32]) -> FetchOutput<u32> {
        panic!("adapter bug");
    }
}
