//! Shipping methods and the free-shipping policy.

use crate::error::CommerceError;
use crate::ids::ShippingMethodId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Subtotal at or above which the free method ships for nothing.
pub const FREE_SHIPPING_THRESHOLD: f64 = 100.0;

/// Method that becomes free above the threshold.
pub const FREE_SHIPPING_METHOD: &str = "standard";

/// Rate multiplier for destinations without an explicit entry.
pub const DEFAULT_DESTINATION_MULTIPLIER: f64 = 2.0;

/// A shipping method option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingMethod {
    /// Unique identifier (e.g., "standard").
    pub id: ShippingMethodId,
    /// Display name.
    pub name: String,
    /// Flat shipping price.
    pub price: Money,
    /// Delivery estimate in business days (e.g., "5-7").
    pub estimated_days: String,
}

impl ShippingMethod {
    /// Create a new shipping method.
    pub fn new(
        id: impl Into<ShippingMethodId>,
        name: impl Into<String>,
        price: Money,
        estimated_days: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            estimated_days: estimated_days.into(),
        }
    }

    /// Standard shipping, 5.99, 5-7 days.
    pub fn standard(currency: Currency) -> Self {
        Self::new(
            FREE_SHIPPING_METHOD,
            "Standard Shipping",
            Money::new(5.99, currency),
            "5-7",
        )
    }

    /// Express shipping, 12.99, 2-3 days.
    pub fn express(currency: Currency) -> Self {
        Self::new("express", "Express Shipping", Money::new(12.99, currency), "2-3")
    }

    /// Overnight shipping, 24.99, 1 day.
    pub fn overnight(currency: Currency) -> Self {
        Self::new("overnight", "Overnight Shipping", Money::new(24.99, currency), "1")
    }

    /// The storefront's three default methods.
    pub fn defaults(currency: Currency) -> Vec<ShippingMethod> {
        vec![
            Self::standard(currency),
            Self::express(currency),
            Self::overnight(currency),
        ]
    }

    /// Get delivery estimate string.
    pub fn delivery_estimate(&self) -> String {
        format!("{} business days", self.estimated_days)
    }

    /// Check if this is free shipping.
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }
}

/// Free-shipping threshold and destination surcharges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingPolicy {
    /// Subtotal at which the free method costs nothing.
    #[serde(default = "default_free_threshold")]
    pub free_threshold: f64,

    /// Method that becomes free above the threshold.
    #[serde(default = "default_free_method")]
    pub free_method: ShippingMethodId,

    /// Rate multipliers keyed by uppercase country code.
    #[serde(default = "default_destination_multipliers")]
    pub destination_multipliers: BTreeMap<String, f64>,

    /// Multiplier for any other destination.
    #[serde(default = "default_multiplier")]
    pub default_multiplier: f64,
}

fn default_free_threshold() -> f64 {
    FREE_SHIPPING_THRESHOLD
}

fn default_free_method() -> ShippingMethodId {
    ShippingMethodId::new(FREE_SHIPPING_METHOD)
}

fn default_destination_multipliers() -> BTreeMap<String, f64> {
    BTreeMap::from([("BR".to_string(), 1.0), ("US".to_string(), 1.5)])
}

fn default_multiplier() -> f64 {
    DEFAULT_DESTINATION_MULTIPLIER
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: default_free_threshold(),
            free_method: default_free_method(),
            destination_multipliers: default_destination_multipliers(),
            default_multiplier: default_multiplier(),
        }
    }
}

impl ShippingPolicy {
    /// Policy with the default rules and a custom threshold.
    pub fn with_free_threshold(free_threshold: f64) -> Result<Self, CommerceError> {
        let policy = Self {
            free_threshold,
            ..Self::default()
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check threshold and multipliers.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !self.free_threshold.is_finite() || self.free_threshold < 0.0 {
            return Err(CommerceError::ValidationError(format!(
                "free shipping threshold must be a non-negative number, got {}",
                self.free_threshold
            )));
        }

        let multipliers = self
            .destination_multipliers
            .iter()
            .map(|(dest, m)| (dest.as_str(), *m))
            .chain(std::iter::once(("default", self.default_multiplier)));
        for (destination, value) in multipliers {
            if !value.is_finite() || value <= 0.0 {
                return Err(CommerceError::InvalidMultiplier {
                    destination: destination.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }

    /// Check if `subtotal` reaches the free-shipping threshold.
    pub fn qualifies_for_free_shipping(&self, subtotal: Money) -> bool {
        subtotal.amount >= self.free_threshold
    }

    /// How much more the shopper must spend to get free shipping.
    pub fn amount_until_free_shipping(&self, subtotal: Money) -> Money {
        Money::new((self.free_threshold - subtotal.amount).max(0.0), subtotal.currency)
    }

    /// Shipping cost for a cart.
    ///
    /// An empty cart ships for nothing whatever the method. Otherwise the
    /// free method costs nothing once the threshold is reached, and every
    /// other case pays the method's flat price.
    pub fn resolve(&self, subtotal: Money, method: &ShippingMethod) -> Money {
        if subtotal.amount <= 0.0 {
            return Money::zero(method.price.currency);
        }
        if self.is_free_for(subtotal, method) {
            return Money::zero(method.price.currency);
        }
        method.price
    }

    /// Rate multiplier for a destination country code.
    pub fn multiplier_for(&self, destination: &str) -> f64 {
        self.destination_multipliers
            .get(&destination.to_uppercase())
            .copied()
            .unwrap_or(self.default_multiplier)
    }

    /// Quote every method for a destination, as the shipping calculator does.
    ///
    /// The free method stays free above the threshold; all other rates are
    /// scaled by the destination multiplier.
    pub fn quote(
        &self,
        subtotal: Money,
        methods: &[ShippingMethod],
        destination: &str,
    ) -> Vec<ShippingQuote> {
        let multiplier = self.multiplier_for(destination);
        methods
            .iter()
            .map(|method| {
                let free = self.is_free_for(subtotal, method);
                let rate = if free {
                    Money::zero(method.price.currency)
                } else {
                    method.price.scale(multiplier)
                };
                ShippingQuote {
                    method_id: method.id.clone(),
                    method_name: method.name.clone(),
                    rate,
                    estimated_days: method.estimated_days.clone(),
                    free,
                }
            })
            .collect()
    }

    fn is_free_for(&self, subtotal: Money, method: &ShippingMethod) -> bool {
        method.id == self.free_method && self.qualifies_for_free_shipping(subtotal)
    }
}

/// Shipping cost for a cart subtotal under the default rules.
///
/// ```
/// use storefront_commerce::checkout::{resolve_shipping, ShippingMethod};
/// use storefront_commerce::money::{Currency, Money};
///
/// let standard = ShippingMethod::standard(Currency::USD);
/// assert!(resolve_shipping(Money::usd(100.0), &standard, 100.0).is_zero());
/// assert_eq!(resolve_shipping(Money::usd(99.99), &standard, 100.0), Money::usd(5.99));
/// ```
pub fn resolve_shipping(subtotal: Money, method: &ShippingMethod, free_threshold: f64) -> Money {
    let policy = ShippingPolicy {
        free_threshold,
        ..ShippingPolicy::default()
    };
    policy.resolve(subtotal, method)
}

/// A shipping rate quoted for a destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingQuote {
    /// Quoted method ID.
    pub method_id: ShippingMethodId,
    /// Method name (denormalized).
    pub method_name: String,
    /// Quoted rate.
    pub rate: Money,
    /// Delivery estimate in business days.
    pub estimated_days: String,
    /// Whether the free-shipping rule applied.
    pub free: bool,
}
