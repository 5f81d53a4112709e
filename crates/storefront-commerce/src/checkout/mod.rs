//! Checkout module.
//!
//! Contains shipping methods and the rules that price them.

mod shipping;

pub use shipping::{
    resolve_shipping, ShippingMethod, ShippingPolicy, ShippingQuote,
    DEFAULT_DESTINATION_MULTIPLIER, FREE_SHIPPING_METHOD, FREE_SHIPPING_THRESHOLD,
};
