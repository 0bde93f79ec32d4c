//! Key-value storage adapter for the storefront.
//!
//! Provides a small, forgiving API for persisting JSON-encoded values in a
//! string key-value store, the way a browser's local storage is used:
//!
//! - `KeyValueStore` - raw string store (in-memory or file-backed)
//! - `Storage` - typed get/set/remove that logs failures instead of raising
//! - `keys` - the logical storage keys used by the storefront
//!
//! # Example
//!
//! ```rust
//! use storefront_storage::{MemoryStore, Storage};
//!
//! let storage = Storage::new(MemoryStore::new());
//!
//! storage.set("product-sort", &"price-low");
//! let sort: String = storage.get("product-sort", "default".to_string());
//! assert_eq!(sort, "price-low");
//!
//! storage.remove("product-sort");
//! let sort: String = storage.get("product-sort", "default".to_string());
//! assert_eq!(sort, "default");
//! ```

mod adapter;
mod error;
mod kv;

pub mod keys;

pub use adapter::Storage;
pub use error::StorageError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::keys;
    pub use crate::{FileStore, KeyValueStore, MemoryStore, Storage, StorageError};
}
