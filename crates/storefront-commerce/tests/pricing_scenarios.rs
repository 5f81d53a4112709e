//! End-to-end cart pricing scenarios.

use storefront_commerce::prelude::*;

fn line(id: &str, price: f64, quantity: i64, discount: f64) -> LineItem {
    LineItem::new(id, format!("Item {}", id), Money::usd(price), quantity)
        .unwrap()
        .with_discount(discount)
        .unwrap()
}

/// Small deterministic generator so the invariant checks cover many carts.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn price(&mut self) -> f64 {
        (self.next() % 100_000) as f64 / 100.0
    }
}

#[test]
fn storefront_cart_drawer_scenario() {
    let config = PricingConfig::default();
    let standard = config.shipping_method("standard").unwrap();
    let items = vec![line("1", 79.99, 1, 10.0), line("2", 129.99, 2, 0.0)];

    let pricing = compute_totals(&items, standard, &config).unwrap();

    assert!((pricing.subtotal.amount - 331.971).abs() < 1e-9);
    assert!(pricing.shipping.is_zero());
    assert!((pricing.tax.amount - 26.55768).abs() < 1e-9);
    assert_eq!(pricing.tax.display(), "$26.56");
    assert_eq!(pricing.total.display(), "$358.53");
    assert_eq!(pricing.item_count, 3);
    assert!((pricing.savings.amount - 7.999).abs() < 1e-9);
}

#[test]
fn total_is_exact_sum_of_parts() {
    let config = PricingConfig::default();
    let mut rng = Lcg(42);

    for round in 0..500 {
        let lines = (rng.next() % 6) as usize;
        let items: Vec<LineItem> = (0..lines)
            .map(|i| {
                line(
                    &format!("{}-{}", round, i),
                    rng.price(),
                    (rng.next() % 5 + 1) as i64,
                    (rng.next() % 101) as f64,
                )
            })
            .collect();
        let method = &config.shipping_methods[(rng.next() % 3) as usize];

        let pricing = compute_totals(&items, method, &config).unwrap();
        assert_eq!(
            pricing.total.amount,
            pricing.subtotal.amount + pricing.shipping.amount + pricing.tax.amount
        );
    }
}

#[test]
fn computing_twice_gives_identical_breakdowns() {
    let config = PricingConfig::default();
    let express = config.shipping_method("express").unwrap();
    let items = vec![line("a", 19.99, 3, 5.0), line("b", 0.99, 1, 0.0)];

    let first = compute_totals(&items, express, &config).unwrap();
    let second = compute_totals(&items, express, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_cart_costs_nothing_with_any_method() {
    let config = PricingConfig::default();
    for method in &config.shipping_methods {
        let pricing = compute_totals(&[], method, &config).unwrap();
        assert!(pricing.subtotal.is_zero());
        assert!(pricing.shipping.is_zero());
        assert!(pricing.tax.is_zero());
        assert!(pricing.total.is_zero());
    }
}

#[test]
fn free_shipping_threshold_boundary() {
    let config = PricingConfig::default();
    let standard = config.shipping_method("standard").unwrap();

    let at = compute_totals(&[line("1", 100.0, 1, 0.0)], standard, &config).unwrap();
    assert!(at.shipping.is_zero());

    let below = compute_totals(&[line("1", 99.99, 1, 0.0)], standard, &config).unwrap();
    assert_eq!(below.shipping, Money::usd(5.99));
}

#[test]
fn discount_can_drop_cart_below_threshold() {
    let config = PricingConfig::default();
    let standard = config.shipping_method("standard").unwrap();

    // 110 list price, 100 * 0.9 = 99 after discount.
    let items = vec![line("1", 110.0, 1, 10.0)];
    let pricing = compute_totals(&items, standard, &config).unwrap();
    assert_eq!(pricing.shipping, Money::usd(5.99));
}

#[test]
fn configured_threshold_is_honored() {
    let config = PricingConfig::default()
        .with_free_shipping_threshold(250.0)
        .unwrap();
    let standard = config.shipping_method("standard").unwrap();

    let pricing = compute_totals(&[line("1", 200.0, 1, 0.0)], standard, &config).unwrap();
    assert_eq!(pricing.shipping, Money::usd(5.99));
}

#[test]
fn cart_state_holder_round_trip() {
    let config = PricingConfig::default();
    let standard = config.shipping_method("standard").unwrap();

    let headphones = CatalogProduct::new(
        "1",
        "Wireless Bluetooth Headphones",
        Money::usd(129.99),
        "Electronics",
        FulfillmentType::Dropshipping,
    )
    .with_discount(15.0);

    let mut cart = Cart::new(Currency::USD);
    let id = cart.add_product(&headphones, 1).unwrap();
    let one = cart.totals(standard, &config).unwrap();

    cart.adjust_quantity(&id, 1).unwrap();
    let two = cart.totals(standard, &config).unwrap();
    assert!((two.subtotal.amount - 2.0 * one.subtotal.amount).abs() < 1e-9);

    cart.remove_item(&id);
    let none = cart.totals(standard, &config).unwrap();
    assert!(none.total.is_zero());
}

#[test]
fn breakdown_serializes_for_the_ui() {
    let config = PricingConfig::default();
    let standard = config.shipping_method("standard").unwrap();
    let pricing = compute_totals(&[line("1", 10.0, 1, 0.0)], standard, &config).unwrap();

    let json = serde_json::to_value(pricing.rounded()).unwrap();
    assert_eq!(json["shipping"]["amount"], 5.99);
    assert_eq!(json["subtotal"]["currency"], "USD");
    assert_eq!(json["line_items"][0]["line_item_id"], "1");
}
