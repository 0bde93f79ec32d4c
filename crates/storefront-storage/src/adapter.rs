//! Typed storage adapter with automatic JSON encoding.

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::KeyValueStore;

/// JSON-encoding wrapper around a `KeyValueStore`.
///
/// Every operation is infallible from the caller's point of view: read
/// failures yield the supplied default, write failures leave the previous
/// value in place. Failures are logged at warn level.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
}

impl Storage {
    /// Wrap a store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wrap an already shared store.
    pub fn from_shared(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read and decode the value under `key`, or return `default`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let wishlist: Vec<u64> = storage.get("user-wishlist", Vec::new());
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.store.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!(key, error = %e, "failed to read from storage");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to decode stored value");
                default
            }
        }
    }

    /// Encode and store `value` under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key, error = %e, "failed to encode value for storage");
                return;
            }
        };

        if let Err(e) = self.store.set_item(key, &encoded) {
            warn!(key, error = %e, "failed to save to storage");
        }
    }

    /// Delete `key`.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove_item(key) {
            warn!(key, error = %e, "failed to remove from storage");
        }
    }

    /// Keys currently held by the store, or none if it cannot be read.
    pub fn keys(&self) -> Vec<String> {
        self.store.keys().unwrap_or_else(|e| {
            warn!(error = %e, "failed to list storage keys");
            Vec::new()
        })
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, StorageError};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        sort: String,
        min_price: f64,
    }

    #[test]
    fn test_get_missing_returns_default() {
        let storage = Storage::new(MemoryStore::new());
        let value: Vec<u64> = storage.get("missing", vec![7]);
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_set_then_get() {
        let storage = Storage::new(MemoryStore::new());
        let prefs = Prefs {
            sort: "rating".to_string(),
            min_price: 10.0,
        };
        storage.set("prefs", &prefs);

        let loaded: Option<Prefs> = storage.get("prefs", None);
        assert_eq!(loaded, Some(prefs));
    }

    #[test]
    fn test_malformed_value_returns_default() {
        let store = Arc::new(MemoryStore::new());
        store.insert_raw("user-wishlist", "{not json");
        let storage = Storage::from_shared(store);

        let value: Vec<u64> = storage.get("user-wishlist", Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn test_wrong_shape_returns_default() {
        let store = Arc::new(MemoryStore::new());
        store.insert_raw("user-wishlist", "\"a string\"");
        let storage = Storage::from_shared(store);

        let value: Vec<u64> = storage.get("user-wishlist", vec![1]);
        assert_eq!(value, vec![1]);
    }

    #[test]
    fn test_quota_failure_keeps_previous_value() {
        let store = Arc::new(MemoryStore::with_quota(32));
        let storage = Storage::from_shared(store.clone());

        storage.set("k", &vec![1, 2, 3]);
        storage.set("k", &vec![0u64; 64]);

        let value: Vec<u64> = storage.get("k", Vec::new());
        assert_eq!(value, vec![1, 2, 3]);
        assert!(matches!(
            store.set_item("k", &"x".repeat(64)),
            Err(StorageError::QuotaExceeded { .. })
        ));
    }

    #[test]
    fn test_disabled_store_never_raises() {
        let storage = Storage::new(MemoryStore::disabled());
        storage.set("k", &1);
        storage.remove("k");
        let value: i32 = storage.get("k", 5);
        assert_eq!(value, 5);
        assert!(storage.keys().is_empty());
    }

    #[test]
    fn test_remove() {
        let storage = Storage::new(MemoryStore::new());
        storage.set("k", &"v");
        storage.remove("k");
        let value: String = storage.get("k", "default".to_string());
        assert_eq!(value, "default");
    }
}
