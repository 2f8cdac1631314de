//! Shared helpers for store integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use job_scout::integrations::{DeliveryStrategy, StrategyChain};
use job_scout::storage::{KeyValueStore, MemoryStore, StorageError};
use job_scout::{JobSearchStore, StoreOptions};

/// Options without the artificial loading delay
pub fn fast_options() -> StoreOptions {
    StoreOptions { loading_delay: Duration::ZERO, ..StoreOptions::default() }
}

pub fn memory_store() -> (JobSearchStore, MemoryStore) {
    let storage = MemoryStore::new();
    (JobSearchStore::with_options(storage.clone(), fast_options()), storage)
}

/// Strategy that records payloads and succeeds or fails on demand
#[derive(Clone)]
pub struct RecordingStrategy {
    name: &'static str,
    succeeds: bool,
    pub delivered: Arc<Mutex<Vec<String>>>,
    pub attempts: Arc<AtomicUsize>,
}

impl RecordingStrategy {
    pub fn new(name: &'static str, succeeds: bool) -> Self {
        Self {
            name,
            succeeds,
            delivered: Arc::new(Mutex::new(Vec::new())),
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeliveryStrategy for RecordingStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn deliver(&self, payload: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if !self.succeeds {
            bail!("{} unavailable", self.name);
        }
        self.delivered.lock().unwrap().push(payload.to_string());
        Ok(())
    }
}

pub fn chain_of(strategies: &[RecordingStrategy]) -> StrategyChain {
    strategies
        .iter()
        .cloned()
        .fold(StrategyChain::new(), |chain, strategy| chain.with(strategy))
}

/// Store whose writes always fail; reads behave like an empty store
#[derive(Default)]
pub struct FailingWrites {
    pub writes: AtomicUsize,
}

impl KeyValueStore for FailingWrites {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Write { key: key.to_string(), message: "quota exceeded".to_string() })
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
