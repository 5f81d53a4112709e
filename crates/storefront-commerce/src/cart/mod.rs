//! Shopping cart module.
//!
//! Contains the cart state holder, line items, discounts and the total
//! aggregator.

mod cart;
mod discount;
mod pricing;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use discount::{effective_price, PercentOff};
pub use pricing::{compute_totals, LineItemPricing, PriceBreakdown};
