use std::collections::HashSet;

use tracing::{info, instrument};

use crate::app_system::AppError;
use crate::clients::{OrderClient, ProductClient};
use crate::domain::Order;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VendorStats {
    pub total_products: usize,
    pub active_orders: usize,
    pub total_customers: usize,
    pub revenue: f64,
}

impl VendorStats {
    /// Aggregates over the vendor's active orders (pending or accepted).
    pub fn from_orders(total_products: usize, orders: &[Order]) -> Self {
        let active: Vec<&Order> = orders.iter().filter(|o| o.status.is_active()).collect();
        let customers: HashSet<&str> = active.iter().map(|o| o.farmer_id.as_str()).collect();
        Self {
            total_products,
            active_orders: active.len(),
            total_customers: customers.len(),
            revenue: active.iter().map(|o| o.total_amount).sum(),
        }
    }
}

/// Vendor home screen numbers.
#[derive(Clone)]
pub struct DashboardClient {
    product_client: ProductClient,
    order_client: OrderClient,
}

impl DashboardClient {
    pub fn new(product_client: ProductClient, order_client: OrderClient) -> Self {
        Self {
            product_client,
            order_client,
        }
    }

    #[instrument(skip(self))]
    pub async fn vendor_stats(&self, vendor_id: String) -> Result<VendorStats, AppError> {
        let products = self.product_client.list_by_vendor(vendor_id.clone()).await?;
        let orders = self.order_client.list_for_vendor(vendor_id).await?;
        let stats = VendorStats::from_orders(products.len(), &orders);
        info!(
            products = stats.total_products,
            active_orders = stats.active_orders,
            revenue = stats.revenue,
            "Dashboard stats computed"
        );
        Ok(stats)
    }
}
