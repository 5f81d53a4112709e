//! Cart pricing calculations.

use crate::cart::{LineItem, PercentOff};
use crate::checkout::ShippingMethod;
use crate::config::PricingConfig;
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Complete pricing breakdown for a cart.
///
/// Always produced whole by [`compute_totals`]; `total` equals
/// `subtotal + shipping + tax` exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    /// Sum of discounted line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// subtotal + shipping + tax.
    pub total: Money,
    /// Amount saved through item discounts.
    pub savings: Money,
    /// Number of units (sum of quantities).
    pub item_count: i64,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl PriceBreakdown {
    /// Breakdown of an empty cart.
    pub fn empty(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            shipping: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
            savings: Money::zero(currency),
            item_count: 0,
            line_items: Vec::new(),
        }
    }

    /// Check if any discounts are applied.
    pub fn has_savings(&self) -> bool {
        self.savings.amount > 0.0
    }

    /// Copy with every amount rounded to cents, for display.
    ///
    /// The rounded total comes from the unrounded total, so it can differ by
    /// a cent from the sum of the rounded parts.
    pub fn rounded(&self) -> PriceBreakdown {
        PriceBreakdown {
            subtotal: self.subtotal.rounded(),
            shipping: self.shipping.rounded(),
            tax: self.tax.rounded(),
            total: self.total.rounded(),
            savings: self.savings.rounded(),
            item_count: self.item_count,
            line_items: self
                .line_items
                .iter()
                .map(|line| LineItemPricing {
                    line_item_id: line.line_item_id.clone(),
                    unit_price: line.unit_price.rounded(),
                    effective_unit_price: line.effective_unit_price.rounded(),
                    quantity: line.quantity,
                    line_total: line.line_total.rounded(),
                    savings: line.savings.rounded(),
                })
                .collect(),
        }
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Line item ID.
    pub line_item_id: LineItemId,
    /// List price per unit.
    pub unit_price: Money,
    /// Price per unit after the item discount.
    pub effective_unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// effective_unit_price * quantity.
    pub line_total: Money,
    /// Discount amount over the whole line.
    pub savings: Money,
}

/// Price a list of line items for a shipping method.
///
/// Pure and deterministic: the same inputs always give the same breakdown.
/// Tax is charged on the subtotal only; shipping is not part of the taxable
/// base.
///
/// Fails on the first invalid line (negative price, quantity below one,
/// discount outside 0-100), on duplicate line ids, and on prices not in
/// the configured currency.
pub fn compute_totals(
    items: &[LineItem],
    method: &ShippingMethod,
    config: &PricingConfig,
) -> Result<PriceBreakdown, CommerceError> {
    let currency = config.currency;

    if !config.tax_rate.is_finite() || !(0.0..=1.0).contains(&config.tax_rate) {
        return Err(CommerceError::InvalidTaxRate(config.tax_rate));
    }
    method.price.ensure_valid_price(method.id.as_str())?;
    ensure_currency(currency, method.price.currency)?;

    let mut seen = HashSet::with_capacity(items.len());
    let mut line_items = Vec::with_capacity(items.len());
    let mut subtotal = Money::zero(currency);
    let mut savings = Money::zero(currency);
    let mut item_count = 0_i64;

    for item in items {
        if !seen.insert(&item.id) {
            return Err(CommerceError::DuplicateLineItem(item.id.to_string()));
        }
        item.validate()?;
        ensure_currency(currency, item.unit_price.currency)?;

        let line = price_line(item)?;
        subtotal = subtotal.checked_add(&line.line_total)?;
        savings = savings.checked_add(&line.savings)?;
        item_count += item.quantity;
        line_items.push(line);
    }

    let shipping = config.shipping.resolve(subtotal, method);
    let tax = subtotal.scale(config.tax_rate);
    let total = Money::new(subtotal.amount + shipping.amount + tax.amount, currency);

    debug!(
        lines = line_items.len(),
        item_count,
        subtotal = subtotal.amount,
        shipping = shipping.amount,
        tax = tax.amount,
        total = total.amount,
        method = %method.id,
        "computed cart totals"
    );

    Ok(PriceBreakdown {
        subtotal,
        shipping,
        tax,
        total,
        savings,
        item_count,
        line_items,
    })
}

fn price_line(item: &LineItem) -> Result<LineItemPricing, CommerceError> {
    let discount = PercentOff::new(item.discount_percent)?;
    let quantity = item.quantity as f64;
    let effective_unit_price = discount.apply(item.unit_price);

    Ok(LineItemPricing {
        line_item_id: item.id.clone(),
        unit_price: item.unit_price,
        effective_unit_price,
        quantity: item.quantity,
        line_total: effective_unit_price.scale(quantity),
        savings: discount.savings(item.unit_price).scale(quantity),
    })
}

fn ensure_currency(expected: Currency, got: Currency) -> Result<(), CommerceError> {
    if expected != got {
        return Err(CommerceError::CurrencyMismatch {
            expected: expected.code().to_string(),
            got: got.code().to_string(),
        });
    }
    Ok(())
}
