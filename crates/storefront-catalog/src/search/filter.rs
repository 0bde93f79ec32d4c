//! Filter criteria.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Upper price bound used when none is configured.
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;

/// Highest possible rating.
const MAX_RATING: f64 = 5.0;

/// Filter state for the product listing.
///
/// Encoded with the same camelCase field names the saved-filters key has
/// always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Categories to include. Empty means every category.
    pub category: Vec<String>,
    /// Inclusive lower price bound.
    pub min_price: f64,
    /// Inclusive upper price bound.
    pub max_price: f64,
    /// Inclusive lower bound on the average rating.
    pub min_rating: f64,
    /// Free-text search term.
    pub search: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: Vec::new(),
            min_price: 0.0,
            max_price: DEFAULT_MAX_PRICE,
            min_rating: 0.0,
            search: String::new(),
        }
    }
}

impl FilterCriteria {
    /// Default criteria with a different upper price bound.
    pub fn with_max_price(max_price: f64) -> Self {
        let mut criteria = Self {
            max_price,
            ..Self::default()
        };
        criteria.sanitize();
        criteria
    }

    /// Shallow-merge `update` into these criteria, then correct any invalid
    /// values.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(min_price) = update.min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = update.max_price {
            self.max_price = max_price;
        }
        if let Some(min_rating) = update.min_rating {
            self.min_rating = min_rating;
        }
        if let Some(search) = update.search {
            self.search = search;
        }
        self.sanitize();
    }

    /// Correct invalid values in place.
    ///
    /// A negative or non-finite minimum price becomes 0, a NaN or infinite maximum
    /// becomes `DEFAULT_MAX_PRICE` so the criteria stay encodable as JSON,
    /// the maximum is raised to at least the minimum, the rating
    /// floor is clamped to `[0, 5]` and duplicate categories are dropped.
    pub fn sanitize(&mut self) {
        if !self.min_price.is_finite() || self.min_price < 0.0 {
            self.min_price = 0.0;
        }
        if !self.max_price.is_finite() {
            self.max_price = DEFAULT_MAX_PRICE;
        }
        if self.max_price < self.min_price {
            self.max_price = self.min_price;
        }
        self.min_rating = if self.min_rating.is_nan() {
            0.0
        } else {
            self.min_rating.clamp(0.0, MAX_RATING)
        };

        let mut seen = std::collections::HashSet::new();
        self.category.retain(|c| seen.insert(c.clone()));
    }

    /// Add `category` if absent, remove it if present.
    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.category.iter().position(|c| c == category) {
            self.category.remove(pos);
        } else {
            self.category.push(category.to_string());
        }
    }

    /// Number of active filters relative to `defaults`.
    ///
    /// Each selected category counts once; price bounds, the rating floor
    /// and the search term count once each when they differ from an
    /// unrestricted value.
    pub fn active_count(&self, defaults: &FilterCriteria) -> usize {
        self.category.len()
            + usize::from(self.min_price > defaults.min_price)
            + usize::from(self.max_price < defaults.max_price)
            + usize::from(self.min_rating > 0.0)
            + usize::from(!self.search.is_empty())
    }

    /// Category stage.
    pub fn matches_category(&self, product: &Product) -> bool {
        self.category.is_empty() || self.category.iter().any(|c| *c == product.category)
    }

    /// Price stage.
    pub fn matches_price(&self, product: &Product) -> bool {
        product.price >= self.min_price && product.price <= self.max_price
    }

    /// Rating stage.
    pub fn matches_rating(&self, product: &Product) -> bool {
        product.rating.rate >= self.min_rating
    }

    /// Lower-cased search needle, or `None` when the search is blank.
    pub fn search_needle(&self) -> Option<String> {
        if self.search.trim().is_empty() {
            None
        } else {
            Some(self.search.to_lowercase())
        }
    }

    /// Whether `product` passes every stage.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && self.matches_price(product)
            && self.matches_rating(product)
            && self
                .search_needle()
                .map_or(true, |needle| product.matches_text(&needle))
    }
}

/// A partial update to `FilterCriteria`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub category: Option<Vec<String>>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub search: Option<String>,
}

impl FilterUpdate {
    /// An empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the category selection.
    pub fn category<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Set the lower price bound.
    pub fn min_price(mut self, min: f64) -> Self {
        self.min_price = Some(min);
        self
    }

    /// Set the upper price bound.
    pub fn max_price(mut self, max: f64) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Set both price bounds.
    pub fn price_range(self, (min, max): (f64, f64)) -> Self {
        self.min_price(min).max_price(max)
    }

    /// Set the rating floor.
    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Set the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Price bounds typed into text fields.
pub struct PriceInput;

impl PriceInput {
    /// Parse min/max text into corrected bounds.
    ///
    /// Only a leading integer is read. A missing minimum becomes 0, a
    /// missing or zero maximum becomes `default_max`, negatives floor to 0
    /// and the maximum is raised to at least the minimum.
    pub fn parse(min_text: &str, max_text: &str, default_max: f64) -> (f64, f64) {
        let min = leading_int(min_text).map_or(0.0, |v| v as f64).max(0.0);
        let max = match leading_int(max_text) {
            Some(v) if v != 0 => v as f64,
            _ => default_max,
        };
        (min, max.max(min))
    }
}

/// Parse an optional sign and leading digits, ignoring anything after.
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    #[test]
    fn test_merge_is_shallow() {
        let mut filters = FilterCriteria::default();
        filters.merge(FilterUpdate::new().category(["jewelery"]).min_rating(4.0));
        filters.merge(FilterUpdate::new().search("gold"));

        assert_eq!(filters.category, vec!["jewelery"]);
        assert_eq!(filters.min_rating, 4.0);
        assert_eq!(filters.search, "gold");
        assert_eq!(filters.max_price, DEFAULT_MAX_PRICE);
    }

    #[test]
    fn test_sanitize_corrects_prices() {
        let mut filters = FilterCriteria::default();
        filters.merge(FilterUpdate::new().price_range((-5.0, -10.0)));
        assert_eq!(filters.min_price, 0.0);
        assert_eq!(filters.max_price, 0.0);

        filters.merge(FilterUpdate::new().price_range((50.0, 20.0)));
        assert_eq!((filters.min_price, filters.max_price), (50.0, 50.0));

        filters.merge(FilterUpdate::new().price_range((f64::NAN, f64::NAN)));
        assert_eq!(filters.min_price, 0.0);
        assert_eq!(filters.max_price, DEFAULT_MAX_PRICE);

        filters.merge(FilterUpdate::new().price_range((f64::INFINITY, f64::INFINITY)));
        assert_eq!((filters.min_price, filters.max_price), (0.0, DEFAULT_MAX_PRICE));
    }

    #[test]
    fn test_sanitize_clamps_rating_and_dedupes() {
        let mut filters = FilterCriteria::default();
        filters.merge(
            FilterUpdate::new()
                .min_rating(9.0)
                .category(["a", "b", "a"]),
        );
        assert_eq!(filters.min_rating, 5.0);
        assert_eq!(filters.category, vec!["a", "b"]);

        filters.merge(FilterUpdate::new().min_rating(-1.0));
        assert_eq!(filters.min_rating, 0.0);
    }

    #[test]
    fn test_toggle_category() {
        let mut filters = FilterCriteria::default();
        filters.toggle_category("electronics");
        filters.toggle_category("jewelery");
        assert_eq!(filters.category, vec!["electronics", "jewelery"]);

        filters.toggle_category("electronics");
        assert_eq!(filters.category, vec!["jewelery"]);
    }

    #[test]
    fn test_active_count() {
        let defaults = FilterCriteria::default();
        let mut filters = defaults.clone();
        assert_eq!(filters.active_count(&defaults), 0);

        filters.merge(
            FilterUpdate::new()
                .category(["a", "b"])
                .min_price(10.0)
                .max_price(500.0)
                .min_rating(3.0)
                .search("x"),
        );
        assert_eq!(filters.active_count(&defaults), 6);
    }

    #[test]
    fn test_blank_search_is_inactive() {
        let filters = FilterCriteria {
            search: "   ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filters.search_needle(), None);
        assert!(filters.matches(&product(1, "Anything", 1.0, "misc", 1.0)));
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let filters = FilterCriteria {
            min_price: 10.0,
            max_price: 20.0,
            ..FilterCriteria::default()
        };
        assert!(filters.matches_price(&product(1, "a", 10.0, "m", 1.0)));
        assert!(filters.matches_price(&product(2, "b", 20.0, "m", 1.0)));
        assert!(!filters.matches_price(&product(3, "c", 20.01, "m", 1.0)));
    }

    #[test]
    fn test_decode_saved_filters() {
        let json = r#"{"category":["jewelery"],"minPrice":5,"maxPrice":200,"minRating":3,"search":"gold"}"#;
        let filters: FilterCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(filters.category, vec!["jewelery"]);
        assert_eq!(filters.max_price, 200.0);

        // Missing fields take their defaults.
        let partial: FilterCriteria = serde_json::from_str(r#"{"search":"x"}"#).unwrap();
        assert_eq!(partial.max_price, DEFAULT_MAX_PRICE);
    }

    #[test]
    fn test_price_input_parse() {
        assert_eq!(PriceInput::parse("10", "200", 1000.0), (10.0, 200.0));
        assert_eq!(PriceInput::parse("", "", 1000.0), (0.0, 1000.0));
        assert_eq!(PriceInput::parse("abc", "0", 1000.0), (0.0, 1000.0));
        assert_eq!(PriceInput::parse("-20", "50", 1000.0), (0.0, 50.0));
        assert_eq!(PriceInput::parse("300", "100", 1000.0), (300.0, 300.0));
        assert_eq!(PriceInput::parse("12.75", "99.5", 1000.0), (12.0, 99.0));
    }
}
