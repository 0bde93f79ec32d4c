//! Catalog error types.

use storefront_fetch::FetchError;
use thiserror::Error;

/// Message shown when no product data could be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load product data";

/// Errors that can occur while loading the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Remote fetch failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Reading a local catalog file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog document did not decode.
    #[error("Invalid catalog document: {0}")]
    Decode(#[from] serde_json::Error),

    /// Catalog decoded but breaks a collection invariant.
    #[error("Invalid catalog: {0}")]
    Invalid(String),

    /// Both the primary and the fallback source failed.
    #[error("All catalog sources failed (primary: {primary}; fallback: {fallback})")]
    Unavailable {
        primary: Box<CatalogError>,
        fallback: Box<CatalogError>,
    },
}

impl CatalogError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}
