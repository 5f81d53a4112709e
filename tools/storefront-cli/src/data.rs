//! Built-in demo catalog and cart, and loaders for user-supplied files.

use std::path::Path;

use anyhow::{Context, Result};
use storefront_commerce::prelude::*;

/// The storefront's eight demo products.
pub fn demo_catalog() -> Vec<CatalogProduct> {
    use FulfillmentType::{Affiliate, Dropshipping};

    vec![
        CatalogProduct::new(
            "1",
            "Wireless Bluetooth Headphones",
            Money::usd(129.99),
            "Electronics",
            Dropshipping,
        )
        .with_description("Noise-cancelling over-ear headphones with 30-hour battery life")
        .with_discount(15.0),
        CatalogProduct::new(
            "2",
            "Smart Fitness Watch",
            Money::usd(199.99),
            "Fitness",
            Affiliate,
        )
        .with_affiliate_url("https://example.com/fitness-watch"),
        CatalogProduct::new(
            "3",
            "Portable Bluetooth Speaker",
            Money::usd(79.99),
            "Electronics",
            Dropshipping,
        )
        .with_discount(10.0),
        CatalogProduct::new(
            "4",
            "Professional DSLR Camera",
            Money::usd(899.99),
            "Photography",
            Affiliate,
        )
        .with_affiliate_url("https://example.com/dslr-camera"),
        CatalogProduct::new(
            "5",
            "Smart Home Security System",
            Money::usd(299.99),
            "Home",
            Dropshipping,
        )
        .with_stock(false),
        CatalogProduct::new(
            "6",
            "Ergonomic Office Chair",
            Money::usd(249.99),
            "Furniture",
            Affiliate,
        )
        .with_affiliate_url("https://example.com/office-chair")
        .with_discount(20.0),
        CatalogProduct::new(
            "7",
            "Stainless Steel Water Bottle",
            Money::usd(34.99),
            "Lifestyle",
            Dropshipping,
        ),
        CatalogProduct::new(
            "8",
            "Wireless Charging Pad",
            Money::usd(49.99),
            "Electronics",
            Affiliate,
        )
        .with_affiliate_url("https://example.com/charging-pad")
        .with_discount(5.0),
    ]
}

/// The cart drawer's demo contents: one discounted speaker and two headphones.
pub fn demo_cart() -> Result<Cart> {
    let mut cart = Cart::new(Currency::USD);
    cart.add_item(
        LineItem::new("1", "Portable Bluetooth Speaker", Money::usd(79.99), 1)?
            .with_discount(10.0)?,
    )?;
    cart.add_item(LineItem::new(
        "2",
        "Wireless Bluetooth Headphones",
        Money::usd(129.99),
        2,
    )?)?;
    Ok(cart)
}

/// Load a catalog JSON array, validating every product.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogProduct>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("Invalid catalog: {}", path.display()))
}

/// Parse a catalog JSON array.
pub fn parse_catalog(content: &str) -> Result<Vec<CatalogProduct>> {
    let products: Vec<CatalogProduct> = serde_json::from_str(content)?;
    for product in &products {
        product
            .validate()
            .with_context(|| format!("Product {}", product.id))?;
    }
    Ok(products)
}

/// Load a cart from JSON: either a cart object or a bare array of line items.
pub fn load_cart(path: &Path) -> Result<Cart> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cart: {}", path.display()))?;
    parse_cart(&content).with_context(|| format!("Invalid cart: {}", path.display()))
}

/// Parse a cart object or a bare array of line items.
pub fn parse_cart(content: &str) -> Result<Cart> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let cart = if value.is_array() {
        let items: Vec<LineItem> = serde_json::from_value(value)?;
        let currency = items
            .first()
            .map(|item| item.unit_price.currency)
            .unwrap_or_default();
        Cart {
            currency,
            items,
        }
    } else {
        serde_json::from_value(value)?
    };

    for item in &cart.items {
        item.validate()?;
    }
    Ok(cart)
}
