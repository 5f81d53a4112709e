//! Price a cart.

use anyhow::{Context as _, Result};
use storefront_commerce::prelude::*;

use super::QuoteArgs;
use crate::context::Context;
use crate::data;
use crate::output::truncate;

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let config = &ctx.config.pricing;

    let cart = match args.cart {
        Some(ref path) => data::load_cart(&ctx.resolve_path(path))?,
        None => {
            ctx.output.debug("No --cart given, pricing the demo cart");
            data::demo_cart()?
        }
    };

    let method = config.shipping_method(&args.shipping)?;
    let pricing = cart
        .totals(method, config)
        .context("Failed to price cart")?;

    if ctx.output.is_json() {
        ctx.output.json(&pricing.rounded());
        return Ok(());
    }

    ctx.output.header("Cart Pricing");

    if args.lines {
        let widths = [30, 10, 4, 12];
        ctx.output.table_row(&["ITEM", "UNIT", "QTY", "LINE TOTAL"], &widths);
        for (item, line) in cart.items.iter().zip(&pricing.line_items) {
            let name = if item.name.is_empty() {
                item.id.as_str()
            } else {
                item.name.as_str()
            };
            let unit = line.effective_unit_price.display();
            let quantity = line.quantity.to_string();
            let total = line.line_total.display();
            ctx.output.table_row(
                &[
                    truncate(name, 30).as_str(),
                    unit.as_str(),
                    quantity.as_str(),
                    total.as_str(),
                ],
                &widths,
            );
        }
        println!();
    }

    ctx.output.kv(
        "Items",
        &format!("{} ({} lines)", pricing.item_count, cart.unique_item_count()),
    );
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    if pricing.has_savings() {
        ctx.output.kv("You save", &pricing.savings.display());
    }

    ctx.output.kv(
        "Shipping",
        &format!(
            "{} ({}, {})",
            shipping_label(&pricing, cart.is_empty()),
            method.name,
            method.delivery_estimate()
        ),
    );
    ctx.output.kv(
        &format!("Tax ({}%)", config.tax_rate * 100.0),
        &pricing.tax.display(),
    );
    ctx.output.kv("Total", &pricing.total.display());

    if let Some(gap) = free_shipping_gap(config, method, pricing.subtotal) {
        ctx.output.info(&format!(
            "Add {} more for free {}",
            gap.display(),
            method.name.to_lowercase()
        ));
    }

    Ok(())
}

/// "Free" when a non-empty cart ships for nothing, otherwise the amount.
fn shipping_label(pricing: &PriceBreakdown, cart_is_empty: bool) -> String {
    if pricing.shipping.is_zero() && !cart_is_empty {
        "Free".to_string()
    } else {
        pricing.shipping.display()
    }
}

/// How much more the cart needs before the chosen method becomes free.
fn free_shipping_gap(
    config: &PricingConfig,
    method: &ShippingMethod,
    subtotal: Money,
) -> Option<Money> {
    let policy = &config.shipping;
    if method.id != policy.free_method || policy.qualifies_for_free_shipping(subtotal) {
        return None;
    }
    Some(policy.amount_until_free_shipping(subtotal))
}
