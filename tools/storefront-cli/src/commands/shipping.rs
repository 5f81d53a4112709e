//! Quote shipping rates for a destination.

use anyhow::{bail, Result};
use storefront_commerce::{Money, PricingConfig};

use super::ShippingArgs;
use crate::context::Context;

/// Run the shipping command.
pub fn run(args: ShippingArgs, ctx: &Context) -> Result<()> {
    let config = &ctx.config.pricing;

    let subtotal = subtotal_in(config, args.subtotal)?;
    let destination = args.destination.to_uppercase();

    let quotes = config
        .shipping
        .quote(subtotal, &config.shipping_methods, &destination);

    if ctx.output.is_json() {
        ctx.output.json(&quotes);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Shipping to {} for {}",
        destination,
        subtotal.display()
    ));
    ctx.output.kv(
        "Rate multiplier",
        &format!("x{}", config.shipping.multiplier_for(&destination)),
    );
    println!();

    let widths = [20, 10, 18];
    ctx.output.table_row(&["METHOD", "RATE", "DELIVERY"], &widths);
    for quote in &quotes {
        let rate = if quote.free {
            "Free".to_string()
        } else {
            quote.rate.display()
        };
        let delivery = format!("{} business days", quote.estimated_days);
        ctx.output.table_row(
            &[quote.method_name.as_str(), rate.as_str(), delivery.as_str()],
            &widths,
        );
    }

    if !config.shipping.qualifies_for_free_shipping(subtotal) {
        println!();
        ctx.output.info(&format!(
            "Free {} shipping on orders over {}",
            config.shipping.free_method,
            Money::new(config.shipping.free_threshold, config.currency).display()
        ));
    }

    Ok(())
}

/// Price a `--subtotal` flag in the configured currency.
fn subtotal_in(config: &PricingConfig, amount: f64) -> Result<Money> {
    if !amount.is_finite() || amount < 0.0 {
        bail!("Subtotal must be a non-negative number, got {}", amount);
    }
    Ok(Money::new(amount, config.currency))
}
