//! Key-value persistence behind the search store.
//!
//! The store mirrors favorites, history and settings into a
//! [`KeyValueStore`] as JSON strings. Backends are injected, so
//! non-interactive contexts can pass a [`NullStore`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

pub const KEY_FAVORITES: &str = "favorites";
pub const KEY_HISTORY: &str = "searchHistory";
pub const KEY_SETTINGS: &str = "settings";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read '{key}': {message}")]
    Read { key: String, message: String },

    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// String key-value persistence
pub trait KeyValueStore: Send + Sync {
    /// Stored value for `key`, or `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Backend name for log lines
    fn backend_name(&self) -> &'static str;
}

/// Store that keeps nothing; every read misses
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl KeyValueStore for NullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "null"
    }
}
