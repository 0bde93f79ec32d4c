//! Filter/sort projection over an in-memory collection.

use super::{FilterCriteria, SortKey};
use crate::catalog::Product;

/// Filter and order `all` for display.
///
/// Stages run in a fixed order: category, price, rating, search, then a
/// stable sort. Ties under the sort key keep their input order, so equal
/// inputs always yield equal outputs.
pub fn project(all: &[Product], filters: &FilterCriteria, sort: SortKey) -> Vec<Product> {
    let needle = filters.search_needle();

    let mut projected: Vec<Product> = all
        .iter()
        .filter(|p| filters.matches_category(p))
        .filter(|p| filters.matches_price(p))
        .filter(|p| filters.matches_rating(p))
        .filter(|p| needle.as_deref().map_or(true, |n| p.matches_text(n)))
        .cloned()
        .collect();

    if sort != SortKey::Default {
        projected.sort_by(|a, b| sort.compare(a, b));
    }

    projected
}
