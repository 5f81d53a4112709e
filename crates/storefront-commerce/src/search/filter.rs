//! Catalog filter criteria.

use crate::catalog::{CatalogProduct, FulfillmentType};
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound of the storefront's price slider.
pub const STOREFRONT_PRICE_MAX: f64 = 1000.0;

/// Product type tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Every product.
    #[default]
    All,
    /// Affiliate products only.
    Affiliate,
    /// Dropshipping products only.
    Dropshipping,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Affiliate => "affiliate",
            TypeFilter::Dropshipping => "dropshipping",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(TypeFilter::All),
            "affiliate" => Some(TypeFilter::Affiliate),
            "dropshipping" => Some(TypeFilter::Dropshipping),
            _ => None,
        }
    }

    /// Check if a product type passes this tab.
    pub fn matches(&self, fulfillment: FulfillmentType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Affiliate => fulfillment == FulfillmentType::Affiliate,
            TypeFilter::Dropshipping => fulfillment == FulfillmentType::Dropshipping,
        }
    }
}

/// Inclusive price bounds, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawPriceRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = CommerceError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        PriceRange::new(raw.min, raw.max)
    }
}

impl PriceRange {
    /// Create a range, rejecting `min > max` and NaN bounds.
    pub fn new(min: f64, max: f64) -> Result<Self, CommerceError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(CommerceError::InvalidPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The storefront slider's initial range, 0-1000.
    pub fn storefront_default() -> Self {
        Self {
            min: 0.0,
            max: STOREFRONT_PRICE_MAX,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Check if `price` lies within the bounds, both ends included.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Filters selected in the catalog sidebar.
///
/// All active filters must pass for a product to be shown. The default value
/// restricts nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Product type tab.
    #[serde(default)]
    pub type_filter: TypeFilter,
    /// Case-insensitive substring of the product name; empty matches all.
    #[serde(default)]
    pub search_text: String,
    /// Bounds on the list price; `None` is unbounded.
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    /// Allowed categories; empty allows every category.
    #[serde(default)]
    pub categories: BTreeSet<String>,
    /// Hide out-of-stock products.
    #[serde(default)]
    pub in_stock_only: bool,
}

impl FilterCriteria {
    /// Criteria that restrict nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sidebar's state when the catalog page opens: price 0-1000 and
    /// in-stock products only.
    pub fn storefront_default() -> Self {
        Self {
            price_range: Some(PriceRange::storefront_default()),
            in_stock_only: true,
            ..Self::default()
        }
    }

    /// Check if no filter is active.
    pub fn is_unrestricted(&self) -> bool {
        self.type_filter == TypeFilter::All
            && self.search_text.is_empty()
            && self.price_range.is_none()
            && self.categories.is_empty()
            && !self.in_stock_only
    }

    /// Check a product against every active filter.
    pub fn matches(&self, product: &CatalogProduct) -> bool {
        if !self.type_filter.matches(product.fulfillment) {
            return false;
        }

        if !self.search_text.is_empty()
            && !product
                .name
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
        {
            return false;
        }

        if let Some(range) = &self.price_range {
            if !range.contains(product.price.amount) {
                return false;
            }
        }

        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }

        if self.in_stock_only && !product.in_stock {
            return false;
        }

        true
    }

    /// Select a category, or deselect it if already selected.
    ///
    /// Returns whether the category is selected afterwards.
    pub fn toggle_category(&mut self, category: impl Into<String>) -> bool {
        let category = category.into();
        if self.categories.remove(&category) {
            false
        } else {
            self.categories.insert(category);
            true
        }
    }

    /// The sidebar's "Reset" button: restores the price range, categories and
    /// stock filter. The type tab and search text are kept.
    pub fn reset(&mut self) {
        self.price_range = Some(PriceRange::storefront_default());
        self.categories.clear();
        self.in_stock_only = true;
    }
}
