//! Pricing configuration.
//!
//! Every field has a documented default, so an empty `[pricing]` table is a
//! complete configuration. Shipping method prices default to the configured
//! currency. Deserialized values are not trusted until
//! [`PricingConfig::validate`] has run.

use crate::checkout::{ShippingMethod, ShippingPolicy};
use crate::error::CommerceError;
use crate::ids::ShippingMethodId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default sales tax rate applied to the subtotal.
pub const DEFAULT_TAX_RATE: f64 = 0.08;

/// Inputs the cart aggregator needs besides the items themselves.
///
/// Shipping method prices given as bare numbers, or without a currency, are
/// priced in the configured `currency`, and the default methods follow it
/// too, so `currency = "BRL"` alone is a complete configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawPricingConfig")]
pub struct PricingConfig {
    /// Currency all prices are expected in (default: USD).
    pub currency: Currency,

    /// Tax rate on the subtotal, 0-1 (default: 0.08).
    pub tax_rate: f64,

    /// Free-shipping and destination rules.
    pub shipping: ShippingPolicy,

    /// Offered shipping methods (default: standard, express, overnight).
    pub shipping_methods: Vec<ShippingMethod>,
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

/// On-the-wire form of [`PricingConfig`], before method prices get a currency.
#[derive(Deserialize)]
struct RawPricingConfig {
    #[serde(default)]
    currency: Currency,
    #[serde(default = "default_tax_rate")]
    tax_rate: f64,
    #[serde(default)]
    shipping: ShippingPolicy,
    #[serde(default)]
    shipping_methods: Option<Vec<RawShippingMethod>>,
}

#[derive(Deserialize)]
struct RawShippingMethod {
    id: ShippingMethodId,
    name: String,
    price: RawPrice,
    estimated_days: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Amount(f64),
    Full {
        amount: f64,
        #[serde(default)]
        currency: Option<Currency>,
    },
}

impl RawPrice {
    fn in_currency(self, fallback: Currency) -> Money {
        match self {
            RawPrice::Amount(amount) => Money::new(amount, fallback),
            RawPrice::Full { amount, currency } => {
                Money::new(amount, currency.unwrap_or(fallback))
            }
        }
    }
}

impl From<RawPricingConfig> for PricingConfig {
    fn from(raw: RawPricingConfig) -> Self {
        let currency = raw.currency;
        let shipping_methods = match raw.shipping_methods {
            Some(methods) => methods
                .into_iter()
                .map(|m| {
                    let price = m.price.in_currency(currency);
                    ShippingMethod::new(m.id, m.name, price, m.estimated_days)
                })
                .collect(),
            None => ShippingMethod::defaults(currency),
        };

        Self {
            currency,
            tax_rate: raw.tax_rate,
            shipping: raw.shipping,
            shipping_methods,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::for_currency(Currency::default())
    }
}

impl PricingConfig {
    /// Default configuration for a currency, with methods priced in it.
    pub fn for_currency(currency: Currency) -> Self {
        Self {
            currency,
            tax_rate: DEFAULT_TAX_RATE,
            shipping: ShippingPolicy::default(),
            shipping_methods: ShippingMethod::defaults(currency),
        }
    }

    /// Switch the configured currency.
    ///
    /// Methods priced in the old currency are relabelled with the new one;
    /// amounts are kept as written, no exchange rate is applied.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        let previous = self.currency;
        for method in &mut self.shipping_methods {
            if method.price.currency == previous {
                method.price = Money::new(method.price.amount, currency);
            }
        }
        self.currency = currency;
        self
    }

    /// Replace the tax rate.
    pub fn with_tax_rate(mut self, tax_rate: f64) -> Result<Self, CommerceError> {
        self.tax_rate = tax_rate;
        self.validate()?;
        Ok(self)
    }

    /// Replace the free-shipping threshold.
    pub fn with_free_shipping_threshold(mut self, threshold: f64) -> Result<Self, CommerceError> {
        self.shipping.free_threshold = threshold;
        self.validate()?;
        Ok(self)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !self.tax_rate.is_finite() || !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(CommerceError::InvalidTaxRate(self.tax_rate));
        }

        self.shipping.validate()?;

        if self.shipping_methods.is_empty() {
            return Err(CommerceError::ValidationError(
                "at least one shipping method is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for method in &self.shipping_methods {
            if method.id.as_str().is_empty() {
                return Err(CommerceError::ValidationError(
                    "shipping method id must not be empty".to_string(),
                ));
            }
            if !seen.insert(method.id.as_str()) {
                return Err(CommerceError::ValidationError(format!(
                    "duplicate shipping method: {}",
                    method.id
                )));
            }
            method.price.ensure_valid_price(method.id.as_str())?;
            if method.price.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: method.price.currency.code().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Look up an offered shipping method.
    pub fn shipping_method(&self, id: &str) -> Result<&ShippingMethod, CommerceError> {
        self.shipping_methods
            .iter()
            .find(|m| m.id.as_str() == id)
            .ok_or_else(|| CommerceError::ShippingMethodNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PricingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tax_rate, 0.08);
        assert_eq!(config.shipping.free_threshold, 100.0);
        assert_eq!(config.shipping_methods.len(), 3);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: PricingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_rejects_bad_tax_rate() {
        assert_eq!(
            PricingConfig::default().with_tax_rate(1.5),
            Err(CommerceError::InvalidTaxRate(1.5))
        );
        assert!(PricingConfig::default().with_tax_rate(-0.1).is_err());
        assert!(PricingConfig::default().with_tax_rate(0.0).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_methods() {
        let mut config = PricingConfig::default();
        config
            .shipping_methods
            .push(ShippingMethod::standard(Currency::USD));
        assert!(matches!(
            config.validate(),
            Err(CommerceError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_method_in_other_currency() {
        let mut config = PricingConfig::for_currency(Currency::BRL);
        assert!(config.validate().is_ok());

        config.shipping_methods[0] = ShippingMethod::standard(Currency::USD);
        assert!(matches!(
            config.validate(),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_currency_alone_prices_default_methods() {
        let config: PricingConfig = serde_json::from_str(r#"{"currency": "BRL"}"#).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config, PricingConfig::for_currency(Currency::BRL));
        assert_eq!(
            config.shipping_method("standard").unwrap().price,
            Money::new(5.99, Currency::BRL)
        );
    }

    #[test]
    fn test_bare_method_prices_follow_config_currency() {
        let json = r#"{
            "currency": "BRL",
            "shipping_methods": [
                {"id": "standard", "name": "Standard", "price": 15.0, "estimated_days": "5-7"},
                {"id": "express", "name": "Express", "price": {"amount": 30.0}, "estimated_days": "2-3"}
            ]
        }"#;
        let config: PricingConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert!(config
            .shipping_methods
            .iter()
            .all(|m| m.price.currency == Currency::BRL));
    }

    #[test]
    fn test_explicit_method_currency_is_kept() {
        let json = r#"{
            "currency": "BRL",
            "shipping_methods": [
                {"id": "standard", "name": "Standard",
                 "price": {"amount": 5.99, "currency": "USD"}, "estimated_days": "5-7"}
            ]
        }"#;
        let config: PricingConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_with_currency_relabels_methods() {
        let config = PricingConfig::default().with_currency(Currency::BRL);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.shipping_method("express").unwrap().price,
            Money::new(12.99, Currency::BRL)
        );
    }

    #[test]
    fn test_round_trip_keeps_currency() {
        let config = PricingConfig::for_currency(Currency::EUR);
        let json = serde_json::to_string(&config).unwrap();
        let back: PricingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_shipping_method_lookup() {
        let config = PricingConfig::default();
        assert_eq!(config.shipping_method("express").unwrap().name, "Express Shipping");
        assert_eq!(
            config.shipping_method("drone").unwrap_err(),
            CommerceError::ShippingMethodNotFound("drone".to_string())
        );
    }
}
