//! Catalog sources.

use std::path::PathBuf;

use async_trait::async_trait;
use storefront_fetch::FetchClient;

use super::Product;
use crate::CatalogError;

/// Public product catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Fallback collection compiled into the crate.
const BUNDLED_CATALOG: &str = include_str!("../../data/products-fallback.json");

/// Somewhere a product collection can be loaded from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short human-readable description, used in logs.
    fn describe(&self) -> String;

    /// Load the full collection in source order.
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Collection served as JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: FetchClient,
    url: String,
}

impl HttpSource {
    /// Create a source for `url`.
    pub fn new(client: FetchClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The URL this source fetches.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.client.fetch_json(&self.url).await?)
    }
}

/// Collection stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// The fallback collection shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

#[async_trait]
impl CatalogSource for BundledSource {
    fn describe(&self) -> String {
        "bundled catalog".to_string()
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(serde_json::from_str(BUNDLED_CATALOG)?)
    }
}

/// A fixed in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    products: Vec<Product>,
}

impl StaticSource {
    /// Create a source that always yields `products`.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    fn describe(&self) -> String {
        format!("static catalog ({} products)", self.products.len())
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Badge;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_bundled_catalog_is_valid() {
        let products = BundledSource.fetch().await.unwrap();
        assert!(!products.is_empty());

        let ids: HashSet<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products.len());

        for product in &products {
            assert!(!product.title.is_empty());
            assert!(product.price >= 0.0);
            assert!((0.0..=5.0).contains(&product.rating.rate));
        }

        // Authored badges are part of the bundle.
        assert!(products.iter().any(|p| p.badge == Some(Badge::Premium)));
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[{"id": 9, "title": "Lamp", "price": 12.5, "category": "home", "badge": "Sale"}]"#,
        )
        .unwrap();

        let products = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].badge, Some(Badge::Sale));
    }

    #[tokio::test]
    async fn test_file_source_missing() {
        let err = FileSource::new("/nonexistent/products.json")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[tokio::test]
    async fn test_file_source_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{").unwrap();

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
