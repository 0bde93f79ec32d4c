//! Saved filter and sort preferences.

use storefront_storage::{keys, Storage};

use crate::search::{FilterCriteria, SortKey};

/// Filter and sort state persisted across sessions.
#[derive(Debug, Clone)]
pub struct Preferences {
    storage: Storage,
}

impl Preferences {
    /// Create preferences over `storage`.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Saved filters, or `defaults` when nothing usable is stored.
    pub fn load_filters(&self, defaults: &FilterCriteria) -> FilterCriteria {
        let mut filters = self.storage.get(keys::FILTERS, defaults.clone());
        filters.sanitize();
        filters
    }

    pub fn save_filters(&self, filters: &FilterCriteria) {
        self.storage.set(keys::FILTERS, filters);
    }

    /// Saved sort key, or `default` when nothing usable is stored.
    pub fn load_sort(&self, default: SortKey) -> SortKey {
        self.storage.get(keys::SORT, default)
    }

    pub fn save_sort(&self, sort: SortKey) {
        self.storage.set(keys::SORT, &sort);
    }

    /// Forget saved filters and sort.
    pub fn clear(&self) {
        self.storage.remove(keys::FILTERS);
        self.storage.remove(keys::SORT);
    }
}
