//! Catalog view model.
//!
//! Owns loading state, filter state and sort state, and publishes an
//! immutable `CatalogSnapshot` after every change.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use crate::catalog::{CatalogLoader, CatalogOrigin, Product, ProductId};
use crate::preferences::Preferences;
use crate::search::{project, FilterCriteria, FilterUpdate, SortKey, SortOption, SORT_OPTIONS};

/// Loading state of the view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Not yet activated.
    #[default]
    Uninitialized,
    /// A load is in flight. Previously loaded products stay visible.
    Loading,
    /// The catalog is loaded.
    Ready,
    /// The last load failed.
    Error,
}

/// Everything a presentation layer needs to render the catalog.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub state: LoadState,
    /// Filtered and sorted products.
    pub products: Vec<Product>,
    /// The full collection in load order.
    pub all_products: Arc<[Product]>,
    /// Unique categories in first-seen order.
    pub categories: Vec<String>,
    pub filters: FilterCriteria,
    pub sort_by: SortKey,
    /// User-facing message for the last failed load.
    pub error: Option<String>,
    /// Source of the loaded collection.
    pub origin: Option<CatalogOrigin>,
    pub active_filter_count: usize,
}

impl CatalogSnapshot {
    pub fn loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn sort_options(&self) -> &'static [SortOption] {
        &SORT_OPTIONS
    }

    /// Result summary, e.g. "Showing 4 of 20 products".
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} products",
            self.products.len(),
            self.all_products.len()
        )
    }
}

/// Construction options for `CatalogViewModel`.
#[derive(Debug, Clone, Default)]
pub struct ViewModelOptions {
    /// Filters used initially and restored by `clear_filters`.
    pub default_filters: FilterCriteria,
    pub default_sort: SortKey,
    /// Where filters and sort are saved. `None` keeps them in memory only.
    pub preferences: Option<Preferences>,
}

/// Result of a `reload`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The loaded collection replaced the previous one.
    Applied,
    /// Loading failed and the error state was published.
    Failed,
    /// A newer reload was issued before this one finished; its result was
    /// discarded.
    Stale,
}

struct Inner {
    state: LoadState,
    all: Arc<[Product]>,
    categories: Vec<String>,
    projected: Vec<Product>,
    filters: FilterCriteria,
    sort: SortKey,
    error: Option<String>,
    origin: Option<CatalogOrigin>,
    seq: u64,
}

/// The catalog view model.
///
/// Mutations recompute the projection synchronously. Loads are the only
/// suspension point, and the state lock is never held across them. Each
/// load takes a sequence number; a load that completes after a newer one
/// was issued is discarded.
pub struct CatalogViewModel {
    loader: CatalogLoader,
    defaults: FilterCriteria,
    preferences: Option<Preferences>,
    inner: Mutex<Inner>,
    snapshot: watch::Sender<Arc<CatalogSnapshot>>,
}

impl CatalogViewModel {
    /// Create a view model. Saved preferences, if configured, replace the
    /// default filters and sort.
    pub fn new(loader: CatalogLoader, options: ViewModelOptions) -> Self {
        let defaults = options.default_filters;
        let (filters, sort) = match &options.preferences {
            Some(prefs) => (
                prefs.load_filters(&defaults),
                prefs.load_sort(options.default_sort),
            ),
            None => (defaults.clone(), options.default_sort),
        };

        let inner = Inner {
            state: LoadState::Uninitialized,
            all: Arc::from(Vec::new()),
            categories: Vec::new(),
            projected: Vec::new(),
            filters,
            sort,
            error: None,
            origin: None,
            seq: 0,
        };
        let (snapshot, _) = watch::channel(Arc::new(build_snapshot(&inner, &defaults)));

        Self {
            loader,
            defaults,
            preferences: options.preferences,
            inner: Mutex::new(inner),
            snapshot,
        }
    }

    /// Load the catalog if it has never been loaded.
    ///
    /// Returns `None` when the view model was already activated.
    pub async fn activate(&self) -> Option<ReloadOutcome> {
        let seq = {
            let mut inner = self.lock();
            if inner.state != LoadState::Uninitialized {
                return None;
            }
            self.begin_load(&mut inner)
        };
        Some(self.complete_load(seq).await)
    }

    /// Load the catalog again. Products already shown stay visible while
    /// the load is in flight.
    pub async fn reload(&self) -> ReloadOutcome {
        let seq = {
            let mut inner = self.lock();
            self.begin_load(&mut inner)
        };
        self.complete_load(seq).await
    }

    /// Shallow-merge `update` into the current filters.
    pub fn update_filters(&self, update: FilterUpdate) {
        self.mutate_filters(|filters| filters.merge(update));
    }

    /// Restore the default filters.
    pub fn clear_filters(&self) {
        let defaults = self.defaults.clone();
        self.mutate_filters(|filters| *filters = defaults);
    }

    /// Add or remove a category from the filter.
    pub fn toggle_category(&self, category: &str) {
        self.mutate_filters(|filters| filters.toggle_category(category));
    }

    pub fn set_sort(&self, sort: SortKey) {
        {
            let mut inner = self.lock();
            inner.sort = sort;
            self.recompute(&mut inner);
            self.publish(&inner);
        }
        if let Some(prefs) = &self.preferences {
            prefs.save_sort(sort);
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CatalogSnapshot>> {
        self.snapshot.subscribe()
    }

    /// Look up a product in the full collection.
    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.lock().all.iter().find(|p| p.id == id).cloned()
    }

    /// Filters restored by `clear_filters`.
    pub fn default_filters(&self) -> &FilterCriteria {
        &self.defaults
    }

    fn mutate_filters(&self, f: impl FnOnce(&mut FilterCriteria)) {
        let filters = {
            let mut inner = self.lock();
            f(&mut inner.filters);
            inner.filters.sanitize();
            self.recompute(&mut inner);
            self.publish(&inner);
            inner.filters.clone()
        };
        if let Some(prefs) = &self.preferences {
            prefs.save_filters(&filters);
        }
    }

    fn begin_load(&self, inner: &mut Inner) -> u64 {
        inner.seq += 1;
        inner.state = LoadState::Loading;
        inner.error = None;
        self.publish(inner);
        inner.seq
    }

    async fn complete_load(&self, seq: u64) -> ReloadOutcome {
        let result = self.loader.load().await;

        let mut inner = self.lock();
        if seq != inner.seq {
            debug!(seq, latest = inner.seq, "discarding stale catalog load");
            return ReloadOutcome::Stale;
        }

        let outcome = match result {
            Ok(loaded) => {
                inner.all = loaded.products.into();
                inner.categories = loaded.categories;
                inner.origin = Some(loaded.origin);
                inner.error = None;
                inner.state = LoadState::Ready;
                ReloadOutcome::Applied
            }
            Err(e) => {
                // Whatever was shown before stays.
                inner.error = Some(e.user_message().to_string());
                inner.state = LoadState::Error;
                ReloadOutcome::Failed
            }
        };

        self.recompute(&mut inner);
        self.publish(&inner);
        outcome
    }

    fn recompute(&self, inner: &mut Inner) {
        inner.projected = project(&inner.all, &inner.filters, inner.sort);
        debug!(
            shown = inner.projected.len(),
            total = inner.all.len(),
            sort = %inner.sort,
            "recomputed catalog projection"
        );
    }

    fn publish(&self, inner: &Inner) {
        self.snapshot
            .send_replace(Arc::new(build_snapshot(inner, &self.defaults)));
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn build_snapshot(inner: &Inner, defaults: &FilterCriteria) -> CatalogSnapshot {
    CatalogSnapshot {
        state: inner.state,
        products: inner.projected.clone(),
        all_products: Arc::clone(&inner.all),
        categories: inner.categories.clone(),
        filters: inner.filters.clone(),
        sort_by: inner.sort,
        error: inner.error.clone(),
        origin: inner.origin,
        active_filter_count: inner.filters.active_count(defaults),
    }
}

impl std::fmt::Debug for CatalogViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("CatalogViewModel")
            .field("loader", &self.loader)
            .field("state", &snapshot.state)
            .field("products", &snapshot.all_products.len())
            .finish_non_exhaustive()
    }
}
