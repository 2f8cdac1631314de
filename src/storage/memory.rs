use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{KeyValueStore, StorageError};

/// In-process store; clones share the same map
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with raw values
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries: Arc::new(Mutex::new(map)) }
    }

    fn lock(&self, key: &str) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries.lock().map_err(|_| StorageError::Read {
            key: key.to_string(),
            message: "memory store lock poisoned".to_string(),
        })
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock(key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock(key)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock(key)?.remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
