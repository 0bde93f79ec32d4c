//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use storefront_auth::{AuthSession, LocalIdentityProvider, User};
use storefront_catalog::catalog::{
    BundledSource, CatalogLoader, CatalogOrigin, CatalogSource, FileSource, HttpSource,
};
use storefront_catalog::preferences::Preferences;
use storefront_catalog::search::FilterCriteria;
use storefront_catalog::view_model::{CatalogSnapshot, CatalogViewModel, ViewModelOptions};
use storefront_catalog::wishlist::WishlistStore;
use storefront_fetch::{FetchClient, TimeoutConfig};
use storefront_storage::{FileStore, Storage};
use tracing::debug;

use crate::config::{is_url, StorefrontConfig, BUNDLED_FALLBACK, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (StorefrontConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Location of the storage file.
    pub fn storage_path(&self) -> PathBuf {
        match &self.config.storage.path {
            Some(path) => self.resolve_path(&expand_home(path)),
            None => data_dir().join("storefront").join("storage.json"),
        }
    }

    /// Open the local storage.
    pub fn storage(&self) -> Result<Storage> {
        let path = self.storage_path();
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open storage at {}", path.display()))?;
        Ok(Storage::new(store))
    }

    pub fn preferences(&self) -> Result<Preferences> {
        Ok(Preferences::new(self.storage()?))
    }

    pub fn wishlist(&self) -> Result<WishlistStore> {
        Ok(WishlistStore::new(self.storage()?))
    }

    /// Filters used when nothing is saved.
    pub fn default_filters(&self) -> FilterCriteria {
        FilterCriteria::with_max_price(self.config.filters.default_max_price)
    }

    /// Build the catalog loader described by the config.
    pub fn loader(&self) -> Result<CatalogLoader> {
        let timeout = TimeoutConfig::from_millis(self.config.catalog.timeout_ms);
        let client = FetchClient::with_timeout(timeout).context("Failed to create HTTP client")?;

        let primary = Arc::new(HttpSource::new(
            client.clone(),
            self.config.catalog.remote_url.clone(),
        ));

        let fallback_setting = self.config.catalog.fallback.trim();
        let fallback: Arc<dyn CatalogSource> = if fallback_setting == BUNDLED_FALLBACK {
            Arc::new(BundledSource)
        } else if is_url(fallback_setting) {
            Arc::new(HttpSource::new(client, fallback_setting))
        } else {
            Arc::new(FileSource::new(
                self.resolve_path(&expand_home(Path::new(fallback_setting))),
            ))
        };

        Ok(CatalogLoader::new(primary, fallback))
    }

    /// Build a view model, restoring saved preferences when enabled.
    pub fn view_model(&self) -> Result<CatalogViewModel> {
        let preferences = if self.config.filters.persist {
            Some(self.preferences()?)
        } else {
            None
        };

        Ok(CatalogViewModel::new(
            self.loader()?,
            ViewModelOptions {
                default_filters: self.default_filters(),
                preferences,
                ..ViewModelOptions::default()
            },
        ))
    }

    /// Activate `vm` behind a spinner and return the resulting snapshot.
    pub async fn load_catalog(&self, vm: &CatalogViewModel) -> Arc<CatalogSnapshot> {
        let spinner = self.output.spinner("Loading catalog...");
        vm.activate().await;
        spinner.finish_and_clear();

        let snapshot = vm.snapshot();
        if snapshot.origin == Some(CatalogOrigin::Fallback) {
            self.output
                .debug("Live catalog unavailable, showing fallback data");
        }
        snapshot
    }

    /// Auth session for `--user`, signed in when a user id is given.
    pub async fn session(&self, user: Option<&str>) -> Result<AuthSession> {
        let provider = match user {
            Some(uid) => LocalIdentityProvider::new()
                .with_federated_user(User::new(uid, format!("{}@storefront.local", uid))),
            None => LocalIdentityProvider::new(),
        };
        let session = AuthSession::new(Arc::new(provider));

        if user.is_some() {
            session
                .sign_in_with_provider()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        }
        Ok(session)
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Replace a leading `~` with the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
