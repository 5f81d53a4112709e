//! Percentage discounts and the effective-price calculation.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A validated percentage discount (0.0 - 100.0).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PercentOff(f64);

impl PercentOff {
    /// No discount.
    pub const NONE: PercentOff = PercentOff(0.0);

    /// Create a discount, rejecting values outside 0-100.
    pub fn new(percent: f64) -> Result<Self, CommerceError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(CommerceError::InvalidDiscount(percent));
        }
        Ok(Self(percent))
    }

    /// The raw percentage.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Check if this discounts anything.
    pub fn is_none(&self) -> bool {
        self.0 == 0.0
    }

    /// Price after the discount.
    ///
    /// A zero discount returns `price` untouched so no floating-point
    /// noise is introduced on undiscounted items.
    pub fn apply(&self, price: Money) -> Money {
        if self.is_none() {
            return price;
        }
        price.scale(1.0 - self.0 / 100.0)
    }

    /// Amount taken off `price`.
    pub fn savings(&self, price: Money) -> Money {
        if self.is_none() {
            return Money::zero(price.currency);
        }
        price.percentage(self.0)
    }
}

impl TryFrom<f64> for PercentOff {
    type Error = CommerceError;

    fn try_from(percent: f64) -> Result<Self, Self::Error> {
        PercentOff::new(percent)
    }
}

impl From<PercentOff> for f64 {
    fn from(p: PercentOff) -> f64 {
        p.0
    }
}

/// Unit price after a percentage discount.
///
/// The result is unrounded. Callers accumulating many lines should sum
/// these values and round only for display.
///
/// ```
/// use storefront_commerce::cart::effective_price;
/// use storefront_commerce::money::Money;
///
/// let price = effective_price(Money::usd(100.0), 15.0).unwrap();
/// assert_eq!(price.display(), "$85.00");
/// ```
pub fn effective_price(unit_price: Money, discount_percent: f64) -> Result<Money, CommerceError> {
    unit_price.ensure_valid_price("unit price")?;
    let discount = PercentOff::new(discount_percent)?;
    Ok(discount.apply(unit_price))
}
