//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// Products without a price or category are hidden from customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub retailer_id: i64,
    pub name: String,
    pub price: Option<f64>,
    /// Units in stock
    pub quantity: i64,
    pub category: Option<String>,
}

impl Product {
    pub fn is_visible(&self) -> bool {
        self.price.is_some() && self.category.is_some()
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub retailer_id: i64,
    pub name: String,
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: i64,
    pub category: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub category: Option<String>,
}

/// Inventory update addressed by (retailer, product name)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub retailer_id: i64,
    pub product_name: String,
    pub new_qty: i64,
    pub price: Option<f64>,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_requires_price_and_category() {
        let mut p = Product {
            id: 1,
            retailer_id: 1,
            name: "Apples".into(),
            price: Some(95.0),
            quantity: 150,
            category: Some("Fruits".into()),
        };
        assert!(p.is_visible());
        p.category = None;
        assert!(!p.is_visible());
        p.category = Some("Fruits".into());
        p.price = None;
        assert!(!p.is_visible());
    }
}
