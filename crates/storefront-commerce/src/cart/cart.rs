//! Cart and line item types.
//!
//! The cart is the state holder owned by the UI layer. It only records what
//! the shopper picked; prices are always recomputed from scratch by
//! [`compute_totals`].

use crate::cart::{compute_totals, PercentOff, PriceBreakdown};
use crate::catalog::{CatalogProduct, FulfillmentType};
use crate::checkout::ShippingMethod;
use crate::config::PricingConfig;
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Cart currency.
    #[serde(default)]
    pub currency: Currency,
    /// Items in the cart, in the order they were added.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Add a catalog product to the cart.
    ///
    /// Adding a product already in the cart increases its quantity. Only
    /// in-stock dropshipping products can be added; affiliate products are
    /// bought on the partner site.
    pub fn add_product(
        &mut self,
        product: &CatalogProduct,
        quantity: i64,
    ) -> Result<LineItemId, CommerceError> {
        match product.fulfillment {
            FulfillmentType::Affiliate => {
                return Err(CommerceError::ProductUnavailable(format!(
                    "{} is sold through an affiliate link",
                    product.name
                )));
            }
            FulfillmentType::Dropshipping if !product.in_stock => {
                return Err(CommerceError::ProductUnavailable(format!(
                    "{} is out of stock",
                    product.name
                )));
            }
            FulfillmentType::Dropshipping => {}
        }
        product.validate()?;

        let item = LineItem {
            id: (&product.id).into(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            discount_percent: product.discount_percent,
        };
        self.add_item(item)
    }

    /// Add a line item, merging quantities when the id is already present.
    pub fn add_item(&mut self, item: LineItem) -> Result<LineItemId, CommerceError> {
        item.validate()?;
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let new_quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::QuantityExceedsLimit(i64::MAX, MAX_QUANTITY_PER_ITEM))?;
            check_quantity(new_quantity)?;
            existing.quantity = new_quantity;
            return Ok(existing.id.clone());
        }

        let id = item.id.clone();
        self.items.push(item);
        Ok(id)
    }

    /// Set an item's quantity.
    ///
    /// Quantities below one are rejected; use [`Cart::remove_item`] to drop a line.
    pub fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        check_quantity(quantity)?;
        let item = self.item_mut(line_item_id)?;
        item.quantity = quantity;
        Ok(())
    }

    /// Step an item's quantity up or down, never below one.
    ///
    /// Returns the new quantity.
    pub fn adjust_quantity(
        &mut self,
        line_item_id: &LineItemId,
        delta: i64,
    ) -> Result<i64, CommerceError> {
        let item = self.item_mut(line_item_id)?;
        let new_quantity = item.quantity.saturating_add(delta).max(1);
        check_quantity(new_quantity)?;
        item.quantity = new_quantity;
        Ok(new_quantity)
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID.
    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Price the cart for a shipping method.
    pub fn totals(
        &self,
        method: &ShippingMethod,
        config: &PricingConfig,
    ) -> Result<PriceBreakdown, CommerceError> {
        compute_totals(&self.items, method, config)
    }

    fn item_mut(&mut self, line_item_id: &LineItemId) -> Result<&mut LineItem, CommerceError> {
        self.items
            .iter_mut()
            .find(|i| &i.id == line_item_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(line_item_id.to_string()))
    }
}

fn check_quantity(quantity: i64) -> Result<(), CommerceError> {
    if quantity < 1 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Line item identifier, unique within the cart.
    pub id: LineItemId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub name: String,
    /// List price per unit.
    pub unit_price: Money,
    /// Quantity, at least one.
    pub quantity: i64,
    /// Discount percent, 0-100.
    #[serde(default)]
    pub discount_percent: f64,
}

impl LineItem {
    /// Create a new undiscounted line item.
    pub fn new(
        id: impl Into<LineItemId>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
            discount_percent: 0.0,
        };
        item.validate()?;
        Ok(item)
    }

    /// Set the discount percent.
    pub fn with_discount(mut self, percent: f64) -> Result<Self, CommerceError> {
        PercentOff::new(percent)?;
        self.discount_percent = percent;
        Ok(self)
    }

    /// Check price, quantity and discount ranges.
    pub fn validate(&self) -> Result<(), CommerceError> {
        self.unit_price.ensure_valid_price(self.id.as_str())?;
        check_quantity(self.quantity)?;
        PercentOff::new(self.discount_percent)?;
        Ok(())
    }

    /// Price per unit after the discount.
    pub fn effective_unit_price(&self) -> Result<Money, CommerceError> {
        Ok(PercentOff::new(self.discount_percent)?.apply(self.unit_price))
    }

    /// Discounted price for the whole line.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        Ok(self.effective_unit_price()?.scale(self.quantity as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speaker() -> CatalogProduct {
        CatalogProduct::new(
            "3",
            "Portable Bluetooth Speaker",
            Money::usd(79.99),
            "Electronics",
            FulfillmentType::Dropshipping,
        )
        .with_discount(10.0)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::USD);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_product() {
        let mut cart = Cart::default();
        let id = cart.add_product(&speaker(), 2).unwrap();

        assert_eq!(id.as_str(), "3");
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.get_item(&id).unwrap().discount_percent, 10.0);
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = Cart::default();
        cart.add_product(&speaker(), 1).unwrap();
        cart.add_product(&speaker(), 2).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_cannot_add_unavailable_products() {
        let mut cart = Cart::default();

        let err = cart.add_product(&speaker().with_stock(false), 1).unwrap_err();
        assert_eq!(
            err,
            CommerceError::ProductUnavailable("Portable Bluetooth Speaker is out of stock".to_string())
        );

        let watch = CatalogProduct::new(
            "2",
            "Smart Fitness Watch",
            Money::usd(199.99),
            "Fitness",
            FulfillmentType::Affiliate,
        )
        .with_affiliate_url("https://example.com/fitness-watch");
        assert!(cart.add_product(&watch, 1).is_err());

        let err = cart.add_product(&watch.with_stock(false), 1).unwrap_err();
        assert_eq!(
            err,
            CommerceError::ProductUnavailable(
                "Smart Fitness Watch is sold through an affiliate link".to_string()
            )
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::default();
        let id = cart.add_product(&speaker(), 1).unwrap();

        cart.update_quantity(&id, 5).unwrap();
        assert_eq!(cart.item_count(), 5);

        assert_eq!(
            cart.update_quantity(&id, 0),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert_eq!(
            cart.update_quantity(&LineItemId::new("missing"), 1),
            Err(CommerceError::ItemNotInCart("missing".to_string()))
        );
    }

    #[test]
    fn test_adjust_quantity_floors_at_one() {
        let mut cart = Cart::default();
        let id = cart.add_product(&speaker(), 2).unwrap();

        assert_eq!(cart.adjust_quantity(&id, 1).unwrap(), 3);
        assert_eq!(cart.adjust_quantity(&id, -1).unwrap(), 2);
        assert_eq!(cart.adjust_quantity(&id, -10).unwrap(), 1);
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::default();
        let result = cart.add_product(&speaker(), MAX_QUANTITY_PER_ITEM + 1);
        assert!(matches!(
            result,
            Err(CommerceError::QuantityExceedsLimit(_, _))
        ));

        let id = cart.add_product(&speaker(), MAX_QUANTITY_PER_ITEM).unwrap();
        assert!(cart.add_product(&speaker(), 1).is_err());
        assert!(cart.adjust_quantity(&id, 1).is_err());
        assert_eq!(cart.item_count(), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        let id = cart.add_product(&speaker(), 1).unwrap();
        cart.add_item(LineItem::new("x", "Extra", Money::usd(5.0), 1).unwrap())
            .unwrap();

        assert!(cart.remove_item(&id));
        assert!(!cart.remove_item(&id));
        assert_eq!(cart.unique_item_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_item_rejects_other_currency() {
        let mut cart = Cart::new(Currency::USD);
        let item = LineItem::new("x", "Extra", Money::new(5.0, Currency::EUR), 1).unwrap();
        assert!(matches!(
            cart.add_item(item),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_line_item_helpers() {
        let item = LineItem::new("1", "Headphones", Money::usd(100.0), 3)
            .unwrap()
            .with_discount(15.0)
            .unwrap();
        assert_eq!(item.effective_unit_price().unwrap(), Money::usd(85.0));
        assert_eq!(item.line_total().unwrap(), Money::usd(255.0));

        assert!(LineItem::new("1", "Headphones", Money::usd(100.0), 0).is_err());
        assert!(LineItem::new("1", "Headphones", Money::usd(100.0), 1)
            .unwrap()
            .with_discount(-1.0)
            .is_err());
    }

    #[test]
    fn test_totals_delegates_to_aggregator() {
        let mut cart = Cart::default();
        cart.add_product(&speaker(), 1).unwrap();

        let config = PricingConfig::default();
        let method = config.shipping_method("standard").unwrap();
        let pricing = cart.totals(method, &config).unwrap();

        assert_eq!(pricing.subtotal.display(), "$71.99");
        assert_eq!(pricing.shipping, Money::usd(5.99));
    }
}
