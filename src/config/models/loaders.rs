//! Loader batching configuration

use super::*;
use crate::core::loader::LoaderConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Batching parameters applied to every loader of a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// How long a batch collects keys, in milliseconds
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,
    /// Keys per fetch before a batch is dispatched early (0 = unbounded)
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,
    /// Per-loader overrides keyed by loader name
    #[serde(default)]
    pub overrides: HashMap<String, LoaderTuning>,
}

/// Override of one loader's batching parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderTuning {
    pub wait_ms: Option<u64>,
    pub max_batch: Option<usize>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            wait_ms: default_wait_ms(),
            max_batch: default_max_batch(),
            overrides: HashMap::new(),
        }
    }
}

impl LoaderSettings {
    /// Batching parameters for the loader called `name`
    pub fn config_for(&self, name: &str) -> LoaderConfig {
        let tuning = self.overrides.get(name).copied().unwrap_or_default();
        LoaderConfig::new()
            .with_wait(Duration::from_millis(tuning.wait_ms.unwrap_or(self.wait_ms)))
            .with_max_batch(tuning.max_batch.unwrap_or(self.max_batch))
    }
}
