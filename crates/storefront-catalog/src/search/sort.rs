//! Sort keys for the product listing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// How the product listing is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Load order.
    #[default]
    Default,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    /// Get the encoded key (e.g., "price-low").
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Default => "RECOMMENDED",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Rating",
        }
    }

    /// Order two products under this key. `Default` treats all as equal.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Default => Ordering::Equal,
            SortKey::PriceLow => a.price.total_cmp(&b.price),
            SortKey::PriceHigh => b.price.total_cmp(&a.price),
            SortKey::Rating => b.rating.rate.total_cmp(&a.rating.rate),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(SortKey::Default),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            other => Err(format!(
                "unknown sort key '{}' (expected default, price-low, price-high or rating)",
                other
            )),
        }
    }
}

/// A sort choice as offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub key: SortKey,
    pub label: &'static str,
}

/// Sort choices in display order.
pub const SORT_OPTIONS: [SortOption; 4] = [
    SortOption {
        key: SortKey::Default,
        label: "RECOMMENDED",
    },
    SortOption {
        key: SortKey::PriceLow,
        label: "Price: Low to High",
    },
    SortOption {
        key: SortKey::PriceHigh,
        label: "Price: High to Low",
    },
    SortOption {
        key: SortKey::Rating,
        label: "Rating",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding() {
        assert_eq!(serde_json::to_string(&SortKey::PriceLow).unwrap(), r#""price-low""#);
        assert_eq!(
            serde_json::from_str::<SortKey>(r#""price-high""#).unwrap(),
            SortKey::PriceHigh
        );
        assert!(serde_json::from_str::<SortKey>(r#""newest""#).is_err());
    }

    #[test]
    fn test_from_str_matches_as_str() {
        for option in SORT_OPTIONS {
            assert_eq!(option.key.as_str().parse::<SortKey>().unwrap(), option.key);
            assert_eq!(option.key.label(), option.label);
        }
        assert!("cheapest".parse::<SortKey>().is_err());
    }
}
