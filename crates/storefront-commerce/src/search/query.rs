//! Catalog sort order and the filter/sort pipeline.

use crate::catalog::{categories, CatalogProduct};
use crate::error::CommerceError;
use crate::search::{CatalogResults, FacetValue, FilterCriteria, PriceRange, TypeFilter};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Sort options for the catalog grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order, unchanged.
    #[default]
    Featured,
    /// List price, low to high.
    PriceLow,
    /// List price, high to low.
    PriceHigh,
    /// Biggest discount first.
    Discount,
}

impl SortKey {
    /// The select box value (e.g., "price-low").
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Discount => "discount",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "featured" => Some(SortKey::Featured),
            "price-low" => Some(SortKey::PriceLow),
            "price-high" => Some(SortKey::PriceHigh),
            "discount" => Some(SortKey::Discount),
            _ => None,
        }
    }

    /// Parse a select box value; anything unrecognized keeps catalog order.
    pub fn from_select(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Discount => "Biggest Discount",
        }
    }

    /// Order two products. Prices compare on the list price, before discount.
    pub fn compare(&self, a: &CatalogProduct, b: &CatalogProduct) -> Ordering {
        match self {
            SortKey::Featured => Ordering::Equal,
            SortKey::PriceLow => a.price.amount.total_cmp(&b.price.amount),
            SortKey::PriceHigh => b.price.amount.total_cmp(&a.price.amount),
            SortKey::Discount => b.discount_percent.total_cmp(&a.discount_percent),
        }
    }
}

/// Filter a catalog and order the survivors.
///
/// Returns a new vector; `products` is left untouched. Sorting is stable, so
/// products that compare equal keep their catalog order, and
/// [`SortKey::Featured`] returns the filtered catalog as is.
pub fn filter_and_sort(
    products: &[CatalogProduct],
    criteria: &FilterCriteria,
    sort: SortKey,
) -> Vec<CatalogProduct> {
    let mut matched: Vec<CatalogProduct> = products
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect();

    if sort != SortKey::Featured {
        matched.sort_by(|a, b| sort.compare(a, b));
    }

    debug!(
        catalog = products.len(),
        matched = matched.len(),
        sort = sort.as_str(),
        "filtered catalog"
    );

    matched
}

/// A catalog query: filter criteria plus a sort order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Filters to apply.
    #[serde(default)]
    pub criteria: FilterCriteria,
    /// Sort option.
    #[serde(default)]
    pub sort: SortKey,
}

impl CatalogQuery {
    /// Create a query that restricts nothing and keeps catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.criteria.search_text = text.into();
        self
    }

    /// Set the product type tab.
    pub fn with_type(mut self, type_filter: TypeFilter) -> Self {
        self.criteria.type_filter = type_filter;
        self
    }

    /// Set the price bounds.
    pub fn with_price_range(mut self, min: f64, max: f64) -> Result<Self, CommerceError> {
        self.criteria.price_range = Some(PriceRange::new(min, max)?);
        Ok(self)
    }

    /// Allow a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.criteria.categories.insert(category.into());
        self
    }

    /// Hide out-of-stock products.
    pub fn in_stock_only(mut self) -> Self {
        self.criteria.in_stock_only = true;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Run the pipeline.
    pub fn apply(&self, products: &[CatalogProduct]) -> Vec<CatalogProduct> {
        filter_and_sort(products, &self.criteria, self.sort)
    }

    /// Run the pipeline and collect the sidebar's category facet.
    pub fn browse(&self, products: &[CatalogProduct]) -> CatalogResults {
        let items = self.apply(products);
        let facets = categories(products)
            .into_iter()
            .map(|category| FacetValue {
                selected: self.criteria.categories.contains(&category.name),
                value: category.name,
                count: category.product_count,
            })
            .collect();

        CatalogResults::new(items, products.len()).with_categories(facets)
    }
}
