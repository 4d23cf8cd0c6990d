use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Product;

/// One pending purchase in a user's cart.
///
/// Name, price, unit and the quantity bounds are snapshots taken when the line
/// was added; later product edits do not flow back into the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub owner_id: String,
    pub product_id: String,
    pub vendor_id: String,
    pub name: String,
    pub price: f64,
    pub unit: String,
    pub minimum_order_quantity: u32,
    pub max_quantity: u32,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct CartItemCreate {
    pub owner_id: String,
    pub product_id: String,
    pub vendor_id: String,
    pub name: String,
    pub price: f64,
    pub unit: String,
    pub minimum_order_quantity: u32,
    pub max_quantity: u32,
    pub quantity: u32,
}

impl CartItemCreate {
    pub fn from_product(owner_id: impl Into<String>, product: &Product, quantity: u32) -> Self {
        Self {
            owner_id: owner_id.into(),
            product_id: product.id.clone(),
            vendor_id: product.vendor_id.clone(),
            name: product.name.clone(),
            price: product.price_per_unit,
            unit: product.unit.clone(),
            minimum_order_quantity: product.minimum_order_quantity,
            max_quantity: product.quantity,
            quantity,
        }
    }
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
