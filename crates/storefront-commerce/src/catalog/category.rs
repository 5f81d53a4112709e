//! Category listing derived from the catalog.

use crate::catalog::CatalogProduct;
use serde::{Deserialize, Serialize};

/// A category as shown in the filter sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Category name.
    pub name: String,
    /// Number of catalog products in this category.
    pub product_count: usize,
}

/// Distinct categories in first-seen catalog order, with product counts.
pub fn categories(products: &[CatalogProduct]) -> Vec<Category> {
    let mut found: Vec<Category> = Vec::new();
    for product in products {
        match found.iter_mut().find(|c| c.name == product.category) {
            Some(category) => category.product_count += 1,
            None => found.push(Category {
                name: product.category.clone(),
                product_count: 1,
            }),
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FulfillmentType;
    use crate::money::Money;

    fn product(id: &str, category: &str) -> CatalogProduct {
        CatalogProduct::new(
            id,
            format!("Product {}", id),
            Money::usd(10.0),
            category,
            FulfillmentType::Dropshipping,
        )
    }

    #[test]
    fn test_categories_first_seen_order() {
        let products = vec![
            product("1", "Electronics"),
            product("2", "Fitness"),
            product("3", "Electronics"),
            product("4", "Home"),
        ];

        let names: Vec<_> = categories(&products).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Electronics", "Fitness", "Home"]);
    }

    #[test]
    fn test_category_counts() {
        let products = vec![product("1", "Electronics"), product("2", "Electronics")];
        let found = categories(&products);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product_count, 2);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(categories(&[]).is_empty());
    }
}
