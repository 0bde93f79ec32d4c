//! Per-user wishlists.

use storefront_auth::{AuthError, AuthSession, UserId};
use storefront_storage::{keys, Storage};
use tracing::debug;

use crate::catalog::ProductId;

/// Persisted wishlist of product ids, one bucket per user.
///
/// Signed-out callers share the anonymous bucket. Every call re-reads the
/// store, so two stores over the same storage converge on the last write.
#[derive(Debug, Clone)]
pub struct WishlistStore {
    storage: Storage,
}

impl WishlistStore {
    /// Create a wishlist store over `storage`.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Storage key for a user's bucket.
    pub fn key_for(user_id: Option<&UserId>) -> String {
        keys::scoped(keys::WISHLIST, user_id.map(UserId::as_str))
    }

    /// Product ids in insertion order.
    pub fn load(&self, user_id: Option<&UserId>) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = self.storage.get(&Self::key_for(user_id), Vec::new());
        // Hand-edited or legacy values may carry duplicates.
        let mut seen = std::collections::HashSet::new();
        ids.retain(|id| seen.insert(*id));
        ids
    }

    /// Add `id`. Adding an id that is already present changes nothing.
    pub fn add(&self, id: ProductId, user_id: Option<&UserId>) {
        let mut ids = self.load(user_id);
        if ids.contains(&id) {
            return;
        }
        ids.push(id);
        self.save(&ids, user_id);
    }

    /// Remove `id`. Removing an absent id writes nothing.
    pub fn remove(&self, id: ProductId, user_id: Option<&UserId>) {
        let mut ids = self.load(user_id);
        let before = ids.len();
        ids.retain(|existing| *existing != id);
        if ids.len() == before {
            return;
        }
        self.save(&ids, user_id);
    }

    /// Whether `id` is in the wishlist.
    pub fn contains(&self, id: ProductId, user_id: Option<&UserId>) -> bool {
        self.load(user_id).contains(&id)
    }

    /// Flip membership of `id` and return whether it is now present.
    pub fn toggle(&self, id: ProductId, user_id: Option<&UserId>) -> bool {
        if self.contains(id, user_id) {
            self.remove(id, user_id);
            false
        } else {
            self.add(id, user_id);
            true
        }
    }

    /// Toggle `id` in the signed-in user's wishlist.
    ///
    /// Fails with `AuthError::SignInRequired` and writes nothing when no
    /// user is signed in.
    pub fn toggle_for_session(
        &self,
        id: ProductId,
        session: &AuthSession,
    ) -> Result<bool, AuthError> {
        let user = session.require_user()?;
        Ok(self.toggle(id, Some(&user.uid)))
    }

    fn save(&self, ids: &[ProductId], user_id: Option<&UserId>) {
        let key = Self::key_for(user_id);
        debug!(key = %key, count = ids.len(), "saving wishlist");
        self.storage.set(&key, ids);
    }
}
