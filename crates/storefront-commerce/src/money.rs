//! Money type for representing monetary values.
//!
//! Amounts are kept at full `f64` precision while prices are accumulated
//! across line items. Rounding to cents happens only when a value is
//! displayed or explicitly requested with [`Money::rounded`], so per-line
//! rounding error never compounds into the cart total.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    BRL,
    EUR,
    GBP,
    CAD,
    MXN,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::BRL => "BRL",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::MXN => "MXN",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::BRL => "R$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::MXN => "MX$",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "BRL" => Some(Currency::BRL),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "MXN" => Some(Currency::MXN),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Deserializes either from `{"amount": 9.99, "currency": "USD"}` or from a
/// bare number, which is taken as USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "MoneyRepr")]
pub struct Money {
    /// Amount in major units (e.g., dollars), unrounded.
    pub amount: f64,
    /// The currency.
    pub currency: Currency,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Amount(f64),
    Full {
        amount: f64,
        #[serde(default)]
        currency: Currency,
    },
}

impl From<MoneyRepr> for Money {
    fn from(repr: MoneyRepr) -> Self {
        match repr {
            MoneyRepr::Amount(amount) => Money::usd(amount),
            MoneyRepr::Full { amount, currency } => Money::new(amount, currency),
        }
    }
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a USD value.
    ///
    /// ```
    /// use storefront_commerce::money::Money;
    /// let price = Money::usd(49.99);
    /// assert_eq!(price.display(), "$49.99");
    /// ```
    pub fn usd(amount: f64) -> Self {
        Self::new(amount, Currency::USD)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0.0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount < 0.0
    }

    /// Reject negative and non-finite amounts.
    ///
    /// `item` names the value in the resulting error.
    pub fn ensure_valid_price(&self, item: &str) -> Result<(), CommerceError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(CommerceError::InvalidPrice {
                item: item.to_string(),
                value: self.amount,
            });
        }
        Ok(())
    }

    /// Round half away from zero to whole cents.
    pub fn rounded(&self) -> Money {
        Money::new((self.amount * 100.0).round() / 100.0, self.currency)
    }

    /// Amount in cents, rounded.
    pub fn to_cents(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.rounded().amount)
    }

    /// Add another Money value, rejecting mixed currencies.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        Ok(Money::new(self.amount + other.amount, self.currency))
    }

    /// Subtract another Money value, rejecting mixed currencies.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        Ok(Money::new(self.amount - other.amount, self.currency))
    }

    /// Multiply by a scalar factor.
    pub fn scale(&self, factor: f64) -> Money {
        Money::new(self.amount * factor, self.currency)
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: f64) -> Money {
        self.scale(percent / 100.0)
    }

    /// Sum an iterator of Money values.
    pub fn sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

impl Mul<f64> for Money {
    type Output = Money;

    fn mul(self, factor: f64) -> Money {
        self.scale(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
