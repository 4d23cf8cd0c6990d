use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fertilizers,
    Seeds,
    Pesticides,
    Machinery,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Fertilizers,
        Category::Seeds,
        Category::Pesticides,
        Category::Machinery,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fertilizers => "Fertilizers",
            Category::Seeds => "Seeds",
            Category::Pesticides => "Pesticides",
            Category::Machinery => "Machinery",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Drafts are only visible to their vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    pub fn from_quantity(quantity: u32) -> Self {
        if quantity > 0 {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::InStock => f.write_str("In Stock"),
            StockStatus::OutOfStock => f.write_str("Out of Stock"),
        }
    }
}

/// Represents a product listed by a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub vendor_id: String,
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub description: String,
    pub price_per_unit: f64,
    pub unit: String,
    pub quantity: u32,
    pub minimum_order_quantity: u32,
    pub images: Vec<String>,
    pub status: ProductStatus,
    pub stock_status: StockStatus,
    pub created_at: DateTime<Utc>,
}

/// Parameters for listing a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub vendor_id: String,
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub description: String,
    pub price_per_unit: f64,
    pub unit: String,
    pub quantity: u32,
    pub minimum_order_quantity: u32,
    pub images: Vec<String>,
    pub status: ProductStatus,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub price_per_unit: Option<f64>,
    pub unit: Option<String>,
    pub quantity: Option<u32>,
    pub minimum_order_quantity: Option<u32>,
    pub images: Option<Vec<String>>,
}

impl Product {
    pub fn is_purchasable(&self) -> bool {
        self.status == ProductStatus::Active && self.stock_status == StockStatus::InStock
    }
}
