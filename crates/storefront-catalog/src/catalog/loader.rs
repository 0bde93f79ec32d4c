//! Fallback-aware catalog loading.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::{assign_badges, derive_categories, CatalogSource, Product};
use crate::CatalogError;

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    /// The live catalog source.
    Remote,
    /// The fallback collection.
    Fallback,
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A successfully loaded collection.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    /// Products in source order.
    pub products: Vec<Product>,
    /// Unique categories in first-seen order.
    pub categories: Vec<String>,
    /// Which source produced the collection.
    pub origin: CatalogOrigin,
}

impl LoadedCatalog {
    fn new(products: Vec<Product>, origin: CatalogOrigin) -> Self {
        let categories = derive_categories(&products);
        Self {
            products,
            categories,
            origin,
        }
    }
}

/// Loads the catalog from a primary source, falling back to a secondary
/// one.
///
/// Products from the primary source get positional badges; the fallback
/// collection keeps the badges it was authored with. Only the failure of
/// both sources is reported.
#[derive(Clone)]
pub struct CatalogLoader {
    primary: Arc<dyn CatalogSource>,
    fallback: Arc<dyn CatalogSource>,
}

impl CatalogLoader {
    /// Create a loader.
    pub fn new(primary: Arc<dyn CatalogSource>, fallback: Arc<dyn CatalogSource>) -> Self {
        Self { primary, fallback }
    }

    /// Load the catalog.
    pub async fn load(&self) -> Result<LoadedCatalog, CatalogError> {
        let primary_err = match self.load_primary().await {
            Ok(products) => {
                info!(
                    source = %self.primary.describe(),
                    count = products.len(),
                    "catalog loaded"
                );
                return Ok(LoadedCatalog::new(products, CatalogOrigin::Remote));
            }
            Err(e) => e,
        };

        warn!(
            source = %self.primary.describe(),
            error = %primary_err,
            "catalog fetch failed, using fallback data"
        );

        match self.load_fallback().await {
            Ok(products) => {
                info!(
                    source = %self.fallback.describe(),
                    count = products.len(),
                    "fallback catalog loaded"
                );
                Ok(LoadedCatalog::new(products, CatalogOrigin::Fallback))
            }
            Err(fallback_err) => {
                error!(
                    primary = %primary_err,
                    fallback = %fallback_err,
                    "both catalog sources failed"
                );
                Err(CatalogError::Unavailable {
                    primary: Box::new(primary_err),
                    fallback: Box::new(fallback_err),
                })
            }
        }
    }

    async fn load_primary(&self) -> Result<Vec<Product>, CatalogError> {
        let mut products = self.primary.fetch().await?;
        validate(&products)?;
        assign_badges(&mut products);
        Ok(products)
    }

    async fn load_fallback(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.fallback.fetch().await?;
        validate(&products)?;
        Ok(products)
    }
}

impl fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("primary", &self.primary.describe())
            .field("fallback", &self.fallback.describe())
            .finish()
    }
}

/// Check collection invariants: unique ids, non-empty titles, sane prices.
fn validate(products: &[Product]) -> Result<(), CatalogError> {
    let mut ids = HashSet::with_capacity(products.len());
    for product in products {
        if !ids.insert(product.id) {
            return Err(CatalogError::Invalid(format!(
                "duplicate product id {}",
                product.id
            )));
        }
        if product.title.trim().is_empty() {
            return Err(CatalogError::Invalid(format!(
                "product {} has an empty title",
                product.id
            )));
        }
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(CatalogError::Invalid(format!(
                "product {} has invalid price {}",
                product.id, product.price
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use crate::catalog::{Badge, StaticSource};
    use async_trait::async_trait;
    use storefront_fetch::FetchError;

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
            Err(FetchError::Connection("connection refused".to_string()).into())
        }
    }

    fn remote_products(n: u64) -> Vec<Product> {
        (0..n)
            .map(|i| product(i + 1, &format!("Item {}", i), 10.0, "misc", 3.0))
            .collect()
    }

    #[tokio::test]
    async fn test_primary_success_assigns_badges() {
        let loader = CatalogLoader::new(
            Arc::new(StaticSource::new(remote_products(35))),
            Arc::new(FailingSource),
        );

        let loaded = loader.load().await.unwrap();
        assert_eq!(loaded.origin, CatalogOrigin::Remote);
        assert_eq!(loaded.products.len(), 35);
        assert_eq!(loaded.products[0].badge, Some(Badge::New));
        assert_eq!(loaded.products[1].badge, None);
        assert_eq!(loaded.products[4].badge, Some(Badge::New));
        assert_eq!(loaded.products[5].badge, Some(Badge::Sale));
        assert_eq!(loaded.products[7].badge, Some(Badge::Premium));
        assert_eq!(loaded.categories, vec!["misc"]);
    }

    #[tokio::test]
    async fn test_fallback_keeps_authored_badges() {
        let mut fallback = vec![
            product(1, "Ring", 5.0, "jewelery", 4.0),
            product(2, "Drive", 64.0, "electronics", 3.3),
        ];
        fallback[0].badge = Some(Badge::Premium);

        let loader = CatalogLoader::new(
            Arc::new(FailingSource),
            Arc::new(StaticSource::new(fallback.clone())),
        );

        let loaded = loader.load().await.unwrap();
        assert_eq!(loaded.origin, CatalogOrigin::Fallback);
        assert_eq!(loaded.products, fallback);
        assert_eq!(loaded.categories, vec!["jewelery", "electronics"]);
    }

    #[tokio::test]
    async fn test_total_failure() {
        let loader = CatalogLoader::new(Arc::new(FailingSource), Arc::new(FailingSource));

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable { .. }));
        assert_eq!(err.user_message(), "Failed to load product data");
    }

    #[tokio::test]
    async fn test_invalid_primary_falls_back() {
        let duplicated = vec![
            product(1, "A", 1.0, "misc", 3.0),
            product(1, "B", 2.0, "misc", 3.0),
        ];
        let loader = CatalogLoader::new(
            Arc::new(StaticSource::new(duplicated)),
            Arc::new(StaticSource::new(vec![product(7, "C", 3.0, "misc", 3.0)])),
        );

        let loaded = loader.load().await.unwrap();
        assert_eq!(loaded.origin, CatalogOrigin::Fallback);
        assert_eq!(loaded.products.len(), 1);
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let products = vec![product(1, "A", -1.0, "misc", 3.0)];
        assert!(matches!(validate(&products), Err(CatalogError::Invalid(_))));
    }
}
