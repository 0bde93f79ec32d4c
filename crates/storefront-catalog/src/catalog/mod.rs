//! Catalog module.
//!
//! Contains products, catalog sources and the fallback-aware loader.

mod category;
mod loader;
mod product;
mod source;

pub use category::derive_categories;
pub use loader::{CatalogLoader, CatalogOrigin, LoadedCatalog};
pub use product::{assign_badges, Badge, Product, ProductId, Rating, Stars};
pub use source::{
    BundledSource, CatalogSource, FileSource, HttpSource, StaticSource, DEFAULT_CATALOG_URL,
};

#[cfg(test)]
pub(crate) use product::fixtures;
