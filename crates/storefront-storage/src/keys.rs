//! Logical storage keys.

/// Saved filter criteria.
pub const FILTERS: &str = "product-filters";

/// Saved sort preference.
pub const SORT: &str = "product-sort";

/// Wishlist bucket. Suffixed with the user id when a user is signed in.
pub const WISHLIST: &str = "user-wishlist";

/// Build a storage key by joining parts with `-`.
///
/// # Example
///
/// ```rust
/// use storefront_storage::storage_key;
///
/// let key = storage_key!("user-wishlist", "uid-42");
/// assert_eq!(key, "user-wishlist-uid-42");
/// ```
#[macro_export]
macro_rules! storage_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push('-');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

/// Scope `base` to a user, or return it unchanged for the anonymous bucket.
pub fn scoped(base: &str, user_id: Option<&str>) -> String {
    match user_id {
        Some(uid) if !uid.is_empty() => storage_key!(base, uid),
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_with_user() {
        assert_eq!(scoped(WISHLIST, Some("abc")), "user-wishlist-abc");
    }

    #[test]
    fn test_scoped_anonymous() {
        assert_eq!(scoped(WISHLIST, None), "user-wishlist");
        assert_eq!(scoped(WISHLIST, Some("")), "user-wishlist");
    }
}
