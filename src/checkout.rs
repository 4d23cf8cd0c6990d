//! Splitting a cart into one order per vendor.

use crate::domain::{CartItem, OrderItem};

/// The order a single vendor will receive from a checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorOrderDraft {
    pub vendor_id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
}

/// Groups cart lines by vendor, keeping vendors in first-seen order.
pub fn group_by_vendor(cart: &[CartItem]) -> Vec<VendorOrderDraft> {
    let mut drafts: Vec<VendorOrderDraft> = Vec::new();
    for line in cart {
        let index = match drafts.iter().position(|d| d.vendor_id == line.vendor_id) {
            Some(index) => index,
            None => {
                drafts.push(VendorOrderDraft {
                    vendor_id: line.vendor_id.clone(),
                    items: Vec::new(),
                    total: 0.0,
                });
                drafts.len() - 1
            }
        };
        let draft = &mut drafts[index];
        draft.total += line.line_total();
        draft.items.push(OrderItem {
            product_id: line.product_id.clone(),
            product_name: line.name.clone(),
            quantity: line.quantity,
            price_per_unit: line.price,
            unit: line.unit.clone(),
        });
    }
    drafts
}
