use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// A process-local store backed by a map.
///
/// Nothing survives the process. Used as the fake store in tests and
/// anywhere a repository needs a store but not durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with documents.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, serde_json::Value)>,
        K: Into<String>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Keys currently holding a value, in sorted order.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, serde_json::Value>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Backend("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        tracing::debug!(key, "memory store write");
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }
}
