//! Category derivation.

use std::collections::HashSet;

use super::Product;

/// Unique categories of a collection, in first-seen order.
pub fn derive_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|p| seen.insert(p.category.as_str()))
        .map(|p| p.category.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    #[test]
    fn test_first_seen_order() {
        let products = vec![
            product(1, "a", 1.0, "electronics", 3.0),
            product(2, "b", 1.0, "jewelery", 3.0),
            product(3, "c", 1.0, "electronics", 3.0),
            product(4, "d", 1.0, "men's clothing", 3.0),
            product(5, "e", 1.0, "jewelery", 3.0),
        ];

        assert_eq!(
            derive_categories(&products),
            vec!["electronics", "jewelery", "men's clothing"]
        );
    }

    #[test]
    fn test_empty() {
        assert!(derive_categories(&[]).is_empty());
    }
}
