//! Catalog browsing results.

use crate::catalog::CatalogProduct;
use serde::{Deserialize, Serialize};

/// Products to show in the grid, with the sidebar's category facet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogResults {
    /// Filtered and sorted products.
    pub items: Vec<CatalogProduct>,
    /// Number of products in the unfiltered catalog.
    pub catalog_size: usize,
    /// Every catalog category, in first-seen order.
    pub categories: Vec<FacetValue>,
}

impl CatalogResults {
    /// Create results without facets.
    pub fn new(items: Vec<CatalogProduct>, catalog_size: usize) -> Self {
        Self {
            items,
            catalog_size,
            categories: Vec::new(),
        }
    }

    /// Set the category facet.
    pub fn with_categories(mut self, categories: Vec<FacetValue>) -> Self {
        self.categories = categories;
        self
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of matching products (the "N Products" badge).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Names of the selected categories.
    pub fn selected_categories(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .filter(|f| f.selected)
            .map(|f| f.value.as_str())
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetValue {
    /// The value.
    pub value: String,
    /// Number of catalog products with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}
