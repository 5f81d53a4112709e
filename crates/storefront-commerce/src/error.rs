//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in pricing and catalog operations.
///
/// Every variant describes a caller contract violation. Nothing here is
/// transient, so none of them is worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// A price was negative or not a finite number.
    #[error("Invalid price for {item}: {value}")]
    InvalidPrice { item: String, value: f64 },

    /// Quantity below one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Discount percentage outside 0-100.
    #[error("Invalid discount percent: {0} (expected 0-100)")]
    InvalidDiscount(f64),

    /// Tax rate outside 0-1.
    #[error("Invalid tax rate: {0} (expected 0-1)")]
    InvalidTaxRate(f64),

    /// Price range with min above max or non-finite bounds.
    #[error("Invalid price range: {min}..={max}")]
    InvalidPriceRange { min: f64, max: f64 },

    /// Destination shipping multiplier that is not strictly positive.
    #[error("Invalid shipping multiplier for {destination}: {value}")]
    InvalidMultiplier { destination: String, value: f64 },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Shipping method not offered.
    #[error("Shipping method not found: {0}")]
    ShippingMethodNotFound(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Two line items share an id.
    #[error("Duplicate line item: {0}")]
    DuplicateLineItem(String),

    /// Product cannot be added to the cart (out of stock or sold through an affiliate).
    #[error("Product cannot be added to cart: {0}")]
    ProductUnavailable(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CommerceError::InvalidPrice {
            item: "headphones".to_string(),
            value: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid price for headphones: -1");

        let err = CommerceError::InvalidDiscount(120.0);
        assert!(err.to_string().contains("120"));
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<i64>("not json").unwrap_err();
        let err: CommerceError = err.into();
        assert!(matches!(err, CommerceError::SerializationError(_)));
    }
}
