use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Address;

/// Fulfilment status of an order.
///
/// The happy path is `Pending → Accepted → Packed → Shipped → OutForDelivery →
/// Delivered`, with `Pending → Rejected` as the only branch. The tables below
/// describe which moves each side is offered; the store does not enforce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Rejected,
    Packed,
    Shipped,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Rejected,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Packed => "packed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Moves a vendor can make from this status.
    pub fn vendor_actions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Accepted, OrderStatus::Rejected],
            OrderStatus::Accepted => &[OrderStatus::Packed],
            OrderStatus::Packed => &[OrderStatus::Shipped],
            OrderStatus::Shipped => &[OrderStatus::OutForDelivery],
            _ => &[],
        }
    }

    /// Moves a farmer can make from this status.
    pub fn farmer_actions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::OutForDelivery => &[OrderStatus::Delivered],
            _ => &[],
        }
    }

    pub fn is_listed_transition(&self, to: OrderStatus) -> bool {
        self.vendor_actions().contains(&to) || self.farmer_actions().contains(&to)
    }

    /// Still waiting on the vendor.
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Accepted)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown order status: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price_per_unit: f64,
    pub unit: String,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price_per_unit * f64::from(self.quantity)
    }
}

/// Photos a farmer attached when accepting a delivery with a quality complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReview {
    pub images: Vec<String>,
    pub has_quality_issue: bool,
    pub reviewed_at: DateTime<Utc>,
}

/// One vendor's share of a checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub farmer_id: String,
    pub vendor_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub shipping_address: Address,
    pub phone: String,
    pub payment_status: PaymentStatus,
    pub reviewed: bool,
    pub created_at: DateTime<Utc>,
    pub status_updated_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub quality_review: Option<QualityReview>,
}

/// Parameters for creating an order at checkout.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub farmer_id: String,
    pub vendor_id: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub shipping_address: Address,
    pub phone: String,
}

impl Order {
    pub fn contains_product(&self, product_id: &str) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }

    pub fn has_quality_issue(&self) -> bool {
        self.quality_review.as_ref().is_some_and(|r| r.has_quality_issue)
    }
}
