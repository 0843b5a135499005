use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// The persistence trait for Contractor repositories.
///
/// A `KeyValueStore` holds named JSON documents. Repositories read their
/// document once when they are constructed and rewrite it in full after
/// every mutation, so a backend only needs whole-value `get` and `set`.
///
/// ## Semantics
///
/// - `get_raw` on a key that was never written returns `Ok(None)`.
/// - `set_raw` replaces any previous value for the key. A subsequent
///   `get_raw` (on this instance or a fresh one over the same medium)
///   returns the new value.
/// - Keys are independent: writing one never changes another.
///
/// Methods take `&self` so one store can be shared by several repositories;
/// backends use interior mutability for writes.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw JSON document stored under `key`.
    fn get_raw(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;

    /// Replace the JSON document stored under `key`.
    fn set_raw(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError>;

    /// Read and decode the value under `key`, or return `default` when the
    /// key has never been written.
    fn get<T>(&self, key: &str, default: T) -> Result<T, StorageError>
    where
        Self: Sized,
        T: DeserializeOwned,
    {
        match self.get_raw(key)? {
            Some(value) => {
                serde_json::from_value(value).map_err(|e| StorageError::serialization(key, e))
            }
            None => Ok(default),
        }
    }

    /// Encode `value` and store it under `key`.
    fn set<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
        T: Serialize + ?Sized,
    {
        let encoded = serde_json::to_value(value).map_err(|e| StorageError::serialization(key, e))?;
        self.set_raw(key, encoded)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_raw(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        (**self).set_raw(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get_raw(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        (**self).set_raw(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_raw(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        (**self).set_raw(key, value)
    }
}
