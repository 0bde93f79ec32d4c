//! Product catalog view-model for the storefront.
//!
//! This crate provides the product-discovery core:
//!
//! - **Catalog**: products, badges, sources and the fallback-aware loader
//! - **Search**: filter criteria, sort keys and the filter/sort projector
//! - **Wishlist**: per-user product id lists over the storage adapter
//! - **View model**: loading state, filter/sort state and snapshots
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_catalog::prelude::*;
//!
//! let loader = CatalogLoader::new(
//!     Arc::new(HttpSource::new(client, DEFAULT_CATALOG_URL)),
//!     Arc::new(BundledSource),
//! );
//! let vm = CatalogViewModel::new(loader, ViewModelOptions::default());
//! vm.activate().await;
//!
//! vm.update_filters(FilterUpdate::new().min_rating(4.0));
//! vm.set_sort(SortKey::PriceLow);
//!
//! let snapshot = vm.snapshot();
//! println!("{}", snapshot.summary());
//! ```

pub mod error;

pub mod catalog;
pub mod debounce;
pub mod preferences;
pub mod search;
pub mod view_model;
pub mod wishlist;

pub use error::CatalogError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;

    // Catalog
    pub use crate::catalog::{
        derive_categories, Badge, BundledSource, CatalogLoader, CatalogOrigin, CatalogSource,
        FileSource, HttpSource, LoadedCatalog, Product, ProductId, Rating, StaticSource,
        DEFAULT_CATALOG_URL,
    };

    // Search
    pub use crate::search::{
        project, FilterCriteria, FilterUpdate, PriceInput, SortKey, SortOption,
        DEFAULT_MAX_PRICE, SORT_OPTIONS,
    };

    pub use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
    pub use crate::preferences::Preferences;
    pub use crate::view_model::{
        CatalogSnapshot, CatalogViewModel, LoadState, ReloadOutcome, ViewModelOptions,
    };
    pub use crate::wishlist::WishlistStore;
}
