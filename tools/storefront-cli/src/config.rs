//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_catalog::catalog::DEFAULT_CATALOG_URL;
use storefront_catalog::search::DEFAULT_MAX_PRICE;

/// File names searched for, in order, when no `--config` is given.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Fallback setting that selects the collection compiled into the binary.
pub const BUNDLED_FALLBACK: &str = "bundled";

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog sources.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Local storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Filter defaults.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Interactive behaviour.
    #[serde(default)]
    pub ui: UiConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Check the config, returning `(errors, warnings)`.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if !is_url(&self.catalog.remote_url) {
            errors.push(format!(
                "catalog.remote_url '{}' must be an http(s) URL",
                self.catalog.remote_url
            ));
        }

        if self.catalog.fallback.trim().is_empty() {
            errors.push("catalog.fallback must not be empty".to_string());
        }

        if self.catalog.timeout_ms == Some(0) {
            warnings.push("catalog.timeout_ms = 0 disables the request timeout".to_string());
        }

        let max = self.filters.default_max_price;
        if !max.is_finite() || max <= 0.0 {
            errors.push("filters.default_max_price must be a positive number".to_string());
        }

        if self.ui.search_debounce_ms > 5_000 {
            warnings.push(format!(
                "ui.search_debounce_ms = {} is unusually long",
                self.ui.search_debounce_ms
            ));
        }

        (errors, warnings)
    }
}

/// Catalog source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Live catalog endpoint.
    #[serde(default = "default_remote_url")]
    pub remote_url: String,

    /// `bundled`, a file path or an http(s) URL.
    #[serde(default = "default_fallback")]
    pub fallback: String,

    /// Request timeout in milliseconds. Unset or 0 means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_remote_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_fallback() -> String {
    BUNDLED_FALLBACK.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            remote_url: default_remote_url(),
            fallback: default_fallback(),
            timeout_ms: None,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file. Defaults to `~/.local/share/storefront/storage.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Filter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Upper bound of the default price range.
    #[serde(default = "default_max_price")]
    pub default_max_price: f64,

    /// Whether filters and sort are saved between runs.
    #[serde(default = "default_true")]
    pub persist: bool,
}

fn default_max_price() -> f64 {
    DEFAULT_MAX_PRICE
}

fn default_true() -> bool {
    true
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            default_max_price: default_max_price(),
            persist: true,
        }
    }
}

/// Interactive configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Delay before a typed search term is applied.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_search_debounce_ms() -> u64 {
    300
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Whether `s` looks like an http(s) URL.
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[catalog]
remote_url = "{url}"
# "bundled", a JSON file path, or an http(s) URL
fallback = "bundled"
# timeout_ms = 10000

[storage]
# path = "~/.local/share/storefront/storage.json"

[filters]
default_max_price = {max:.1}
persist = true

[ui]
search_debounce_ms = 300
"#,
        url = DEFAULT_CATALOG_URL,
        max = DEFAULT_MAX_PRICE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: StorefrontConfig = toml::from_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.catalog.remote_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.catalog.fallback, "bundled");
        assert_eq!(config.filters.default_max_price, 1000.0);
        assert!(config.filters.persist);
        assert_eq!(config.ui.search_debounce_ms, 300);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [catalog]
            fallback = "./products.json"
            timeout_ms = 2500

            [filters]
            persist = false
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.remote_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.catalog.timeout_ms, Some(2500));
        assert!(!config.filters.persist);
        assert_eq!(config.filters.default_max_price, 1000.0);
    }

    #[test]
    fn test_load_and_save_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");

        let mut config = StorefrontConfig::default();
        config.ui.search_debounce_ms = 150;
        config.storage.path = Some(dir.path().join("storage.json"));
        config.save(&path).unwrap();

        assert_eq!(StorefrontConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_and_save_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");

        let mut config = StorefrontConfig::default();
        config.catalog.timeout_ms = Some(500);
        config.save(&path).unwrap();

        assert_eq!(StorefrontConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_validate() {
        let (errors, warnings) = StorefrontConfig::default().validate();
        assert!(errors.is_empty());
        assert!(warnings.is_empty());

        let mut config = StorefrontConfig::default();
        config.catalog.remote_url = "ftp://example.test".to_string();
        config.filters.default_max_price = -1.0;
        config.catalog.timeout_ms = Some(0);
        let (errors, warnings) = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(warnings.len(), 1);
    }
}
