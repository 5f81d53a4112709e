//! Newtype IDs for type-safe identifiers.
//!
//! Keeps a product id from being passed where a shipping method id is
//! expected, even though both are plain strings on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a string-backed identifier with conversions from `&str`/`String`.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

string_id!(
    /// Catalog product identifier.
    ProductId
);
string_id!(
    /// Cart line identifier, unique within one cart.
    LineItemId
);
string_id!(
    /// Shipping method identifier (`standard`, `express`, ...).
    ShippingMethodId
);

impl From<&ProductId> for LineItemId {
    /// A cart holds one line per product, so the product id doubles as the line id.
    fn from(id: &ProductId) -> Self {
        LineItemId::new(id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: ShippingMethodId = "standard".into();
        assert_eq!(id.as_str(), "standard");
    }

    #[test]
    fn test_id_compares_with_str() {
        let id = ShippingMethodId::new("express");
        assert!(id == *"express");
        assert!(id != *"standard");
    }

    #[test]
    fn test_id_display() {
        let id = ProductId::new("prod-789");
        assert_eq!(format!("{}", id), "prod-789");
    }

    #[test]
    fn test_line_item_id_from_product() {
        let product = ProductId::new("3");
        let line: LineItemId = (&product).into();
        assert_eq!(line.as_str(), "3");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
        let back: ProductId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(back, id);
    }
}
