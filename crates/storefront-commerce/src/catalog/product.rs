//! Catalog product types.

use crate::cart::{effective_price, PercentOff};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How a product reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentType {
    /// Sold by a partner store; the storefront only links out.
    Affiliate,
    /// Shipped by a supplier on the storefront's behalf; goes through the cart.
    Dropshipping,
}

impl FulfillmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentType::Affiliate => "affiliate",
            FulfillmentType::Dropshipping => "dropshipping",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "affiliate" => Some(FulfillmentType::Affiliate),
            "dropshipping" => Some(FulfillmentType::Dropshipping),
            _ => None,
        }
    }
}

/// What the storefront offers the shopper for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseAction {
    /// Product can be put in the cart.
    AddToCart,
    /// Product is bought on the partner site.
    Redirect(String),
    /// Out of stock, or an affiliate product without a link.
    Unavailable,
}

/// A product in the catalog.
///
/// Read-only input to the filter pipeline and to add-to-cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogProduct {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Short description for listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// List price, before any discount.
    pub price: Money,
    /// Category name.
    pub category: String,
    /// Affiliate or dropshipping.
    #[serde(rename = "type")]
    pub fulfillment: FulfillmentType,
    /// Partner link for affiliate products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_url: Option<String>,
    /// Whether the product can currently be bought.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Discount percent shown on the product card.
    #[serde(default)]
    pub discount_percent: f64,
}

fn default_in_stock() -> bool {
    true
}

impl CatalogProduct {
    /// Create an in-stock product with no discount.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        fulfillment: FulfillmentType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            category: category.into(),
            fulfillment,
            affiliate_url: None,
            in_stock: true,
            discount_percent: 0.0,
        }
    }

    /// Set the discount percent.
    pub fn with_discount(mut self, percent: f64) -> Self {
        self.discount_percent = percent;
        self
    }

    /// Set the stock flag.
    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Set the affiliate link.
    pub fn with_affiliate_url(mut self, url: impl Into<String>) -> Self {
        self.affiliate_url = Some(url.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check price and discount ranges.
    pub fn validate(&self) -> Result<(), CommerceError> {
        self.price.ensure_valid_price(&self.name)?;
        PercentOff::new(self.discount_percent)?;
        Ok(())
    }

    /// Check if a discount badge should be shown.
    pub fn has_discount(&self) -> bool {
        self.discount_percent > 0.0
    }

    /// Price after the product discount.
    pub fn effective_price(&self) -> Result<Money, CommerceError> {
        effective_price(self.price, self.discount_percent)
    }

    /// Check if this is an affiliate product.
    pub fn is_affiliate(&self) -> bool {
        self.fulfillment == FulfillmentType::Affiliate
    }

    /// Decide what the product card's buy button does.
    ///
    /// Stock only gates dropshipping; affiliate stock is the partner's
    /// concern, so an affiliate product with a link always redirects.
    pub fn purchase_action(&self) -> PurchaseAction {
        match self.fulfillment {
            FulfillmentType::Affiliate => match self.affiliate_url {
                Some(ref url) => PurchaseAction::Redirect(url.clone()),
                None => PurchaseAction::Unavailable,
            },
            FulfillmentType::Dropshipping if self.in_stock => PurchaseAction::AddToCart,
            FulfillmentType::Dropshipping => PurchaseAction::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headphones() -> CatalogProduct {
        CatalogProduct::new(
            "1",
            "Wireless Bluetooth Headphones",
            Money::usd(129.99),
            "Electronics",
            FulfillmentType::Dropshipping,
        )
        .with_discount(15.0)
    }

    #[test]
    fn test_effective_price() {
        let price = headphones().effective_price().unwrap();
        assert_eq!(price.display(), "$110.49");
    }

    #[test]
    fn test_purchase_action() {
        assert_eq!(headphones().purchase_action(), PurchaseAction::AddToCart);
        assert_eq!(
            headphones().with_stock(false).purchase_action(),
            PurchaseAction::Unavailable
        );

        let watch = CatalogProduct::new(
            "2",
            "Smart Fitness Watch",
            Money::usd(199.99),
            "Fitness",
            FulfillmentType::Affiliate,
        );
        assert_eq!(watch.purchase_action(), PurchaseAction::Unavailable);

        let watch = watch.with_affiliate_url("https://example.com/fitness-watch");
        assert_eq!(
            watch.purchase_action(),
            PurchaseAction::Redirect("https://example.com/fitness-watch".to_string())
        );
    }

    #[test]
    fn test_out_of_stock_affiliate_still_redirects() {
        let watch = CatalogProduct::new(
            "2",
            "Smart Fitness Watch",
            Money::usd(199.99),
            "Fitness",
            FulfillmentType::Affiliate,
        )
        .with_affiliate_url("https://example.com/fitness-watch")
        .with_stock(false);

        assert_eq!(
            watch.purchase_action(),
            PurchaseAction::Redirect("https://example.com/fitness-watch".to_string())
        );
    }

    #[test]
    fn test_validate() {
        assert!(headphones().validate().is_ok());
        assert!(headphones().with_discount(101.0).validate().is_err());

        let mut bad = headphones();
        bad.price = Money::usd(-3.0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_deserialize_storefront_json() {
        let json = r#"{
            "id": "8",
            "name": "Wireless Charging Pad",
            "price": 49.99,
            "type": "affiliate",
            "affiliate_url": "https://example.com/charging-pad",
            "in_stock": true,
            "discount_percent": 5,
            "category": "Electronics"
        }"#;
        let product: CatalogProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.fulfillment, FulfillmentType::Affiliate);
        assert_eq!(product.price, Money::usd(49.99));
        assert_eq!(product.discount_percent, 5.0);
    }

    #[test]
    fn test_fulfillment_from_str() {
        assert_eq!(
            FulfillmentType::from_str("Dropshipping"),
            Some(FulfillmentType::Dropshipping)
        );
        assert_eq!(FulfillmentType::from_str("wholesale"), None);
    }
}
