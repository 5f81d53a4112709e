//! Cart pricing and catalog filtering for the hybrid affiliate/dropshipping
//! storefront.
//!
//! Everything here is a pure, synchronous transformation over small
//! in-memory lists. The UI layer owns the cart and catalog and calls in after
//! every change:
//!
//! - **Cart**: line items, percentage discounts, the total aggregator
//! - **Checkout**: shipping methods, free-shipping threshold, destination quotes
//! - **Catalog**: products, fulfillment type, categories
//! - **Search**: filter criteria, sort order, the filter/sort pipeline
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let config = PricingConfig::default();
//! let mut cart = Cart::new(Currency::USD);
//!
//! let speaker = CatalogProduct::new(
//!     "3",
//!     "Portable Bluetooth Speaker",
//!     Money::usd(79.99),
//!     "Electronics",
//!     FulfillmentType::Dropshipping,
//! )
//! .with_discount(10.0);
//! cart.add_product(&speaker, 1)?;
//!
//! let standard = config.shipping_method("standard")?;
//! let pricing = cart.totals(standard, &config)?;
//! assert_eq!(pricing.total.display(), "$83.74");
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod config;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod search;

pub use config::PricingConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::PricingConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{categories, CatalogProduct, Category, FulfillmentType, PurchaseAction};

    // Cart
    pub use crate::cart::{
        compute_totals, effective_price, Cart, LineItem, LineItemPricing, PercentOff,
        PriceBreakdown,
    };

    // Checkout
    pub use crate::checkout::{resolve_shipping, ShippingMethod, ShippingPolicy, ShippingQuote};

    // Search
    pub use crate::search::{
        filter_and_sort, CatalogQuery, CatalogResults, FacetValue, FilterCriteria, PriceRange,
        SortKey, TypeFilter,
    };
}
