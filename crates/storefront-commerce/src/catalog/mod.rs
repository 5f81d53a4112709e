//! Product catalog module.
//!
//! Contains catalog products and the category listing derived from them.

mod category;
mod product;

pub use category::{categories, Category};
pub use product::{CatalogProduct, FulfillmentType, PurchaseAction};
