//! Search module.
//!
//! Contains filter criteria, sort keys and the filter/sort projector.

mod filter;
mod projector;
mod sort;

pub use filter::{FilterCriteria, FilterUpdate, PriceInput, DEFAULT_MAX_PRICE};
pub use projector::project;
pub use sort::{SortKey, SortOption, SORT_OPTIONS};
