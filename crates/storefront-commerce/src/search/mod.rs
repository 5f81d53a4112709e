//! Search module.
//!
//! Contains filter criteria, sort order and the catalog filter/sort pipeline.

mod filter;
mod query;
mod results;

pub use filter::{FilterCriteria, PriceRange, TypeFilter, STOREFRONT_PRICE_MAX};
pub use query::{filter_and_sort, CatalogQuery, SortKey};
pub use results::{CatalogResults, FacetValue};
