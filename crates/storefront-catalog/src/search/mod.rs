//! Product filtering and search.
//!
//! Builds gateway fetch parameters from listing filters, sort keys and
//! free-text queries.

mod filter;
mod query;

pub use filter::ProductFilter;
pub use query::{text_search_group, ProductQuery, SortKey, SEARCH_FIELDS};
