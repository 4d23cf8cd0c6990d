use tracing::{error, info, instrument, warn};

use crate::actor_framework::{Query, ResourceClient};
use crate::checkout::group_by_vendor;
use crate::clients::{CartClient, ReviewClient, UserClient};
use crate::domain::{Order, OrderCreate, OrderStatus, ReviewCreate};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::review_actor::ReviewError;
use crate::user_actor::UserError;

/// Client for interacting with the Order actor.
///
/// Checkout is orchestrated here: it reads the farmer's profile and cart, writes
/// one order per vendor, then empties the cart.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    cart_client: CartClient,
    review_client: ReviewClient,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        cart_client: CartClient,
        review_client: ReviewClient,
    ) -> Self {
        Self {
            inner,
            user_client,
            cart_client,
            review_client,
        }
    }

    /// Turns the farmer's cart into one pending order per vendor.
    ///
    /// Writes are not transactional. If an order write fails, the orders already
    /// written stay, the cart is left as it was, and a single `CheckoutFailed` is
    /// returned. Calling again re-creates the earlier vendors' orders.
    #[instrument(skip(self))]
    pub async fn place_order(&self, farmer_id: String) -> Result<Vec<String>, OrderError> {
        info!("Processing place_order request");

        // Step 1: Shipping details from the farmer's profile
        let farmer = match self.user_client.require_user(farmer_id.clone()).await {
            Ok(user) => user,
            Err(UserError::NotFound(id)) => {
                error!("Farmer not found");
                return Err(OrderError::InvalidUser(id));
            }
            Err(e) => {
                error!(error = %e, "Farmer lookup failed");
                return Err(OrderError::CheckoutFailed(e.to_string()));
            }
        };
        let (shipping_address, phone) = farmer.shipping_details().ok_or_else(|| {
            warn!("Shipping details missing");
            OrderError::MissingShippingDetails
        })?;

        // Step 2: Group the cart by vendor
        let cart = self.cart_client.list_cart(farmer_id.clone()).await.map_err(|e| {
            error!(error = %e, "Cart lookup failed");
            OrderError::CheckoutFailed(e.to_string())
        })?;
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let drafts = group_by_vendor(&cart);
        info!(lines = cart.len(), vendors = drafts.len(), "Cart grouped by vendor");

        // Step 3: One order per vendor
        let mut order_ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let vendor_id = draft.vendor_id.clone();
            let params = OrderCreate {
                farmer_id: farmer_id.clone(),
                vendor_id: draft.vendor_id,
                items: draft.items,
                total_amount: draft.total,
                shipping_address: shipping_address.clone(),
                phone: phone.clone(),
            };
            match self.inner.create(params).await {
                Ok(id) => {
                    info!(order_id = %id, vendor_id = %vendor_id, total = draft.total, "Order created");
                    order_ids.push(id);
                }
                Err(e) => {
                    error!(vendor_id = %vendor_id, written = order_ids.len(), error = %e, "Order write failed");
                    return Err(OrderError::CheckoutFailed(e.to_string()));
                }
            }
        }

        // Step 4: Clear the cart
        self.cart_client.clear_cart(farmer_id).await.map_err(|e| {
            error!(error = %e, "Cart clear failed after orders were written");
            OrderError::CheckoutFailed(e.to_string())
        })?;

        info!(orders = order_ids.len(), "Orders placed successfully");
        Ok(order_ids)
    }

    /// The farmer's orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_farmer(&self, farmer_id: String) -> Result<Vec<Order>, OrderError> {
        let query = Query::new(format!("farmer_id == {}", farmer_id), move |o: &Order| {
            o.farmer_id == farmer_id
        });
        let mut orders = self.inner.list(query).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Orders addressed to the vendor, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_vendor(&self, vendor_id: String) -> Result<Vec<Order>, OrderError> {
        let query = Query::new(format!("vendor_id == {}", vendor_id), move |o: &Order| {
            o.vendor_id == vendor_id
        });
        let mut orders = self.inner.list(query).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Writes a new status.
    ///
    /// Moves outside the vendor/farmer action tables are logged but still
    /// written; nothing below this layer guards the sequence.
    #[instrument(skip(self))]
    pub async fn update_status(&self, order_id: String, to: OrderStatus) -> Result<OrderStatus, OrderError> {
        match self.inner.perform_action(order_id, OrderAction::SetStatus(to)).await? {
            OrderActionResult::StatusChanged { from, to } => {
                if from.is_listed_transition(to) {
                    info!(%from, %to, "Order status updated");
                } else {
                    warn!(%from, %to, "Order status written outside the listed transitions");
                }
                Ok(from)
            }
            other => Err(OrderError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }

    /// Farmer accepts the delivery as is.
    #[instrument(skip(self))]
    pub async fn confirm_delivery(&self, order_id: String) -> Result<(), OrderError> {
        self.update_status(order_id, OrderStatus::Delivered).await.map(|_| ())
    }

    /// Farmer accepts the delivery and reports a quality issue with photos.
    #[instrument(skip(self, images), fields(images = images.len()))]
    pub async fn submit_quality_review(&self, order_id: String, images: Vec<String>) -> Result<(), OrderError> {
        self.inner
            .perform_action(order_id, OrderAction::SubmitQualityReview { images })
            .await?;
        info!("Quality review submitted");
        Ok(())
    }

    /// Writes a product review for a delivered order, then flags the order as
    /// reviewed.
    #[instrument(skip(self, text))]
    pub async fn submit_review(
        &self,
        order_id: String,
        product_id: String,
        rating: u8,
        text: String,
    ) -> Result<String, OrderError> {
        let order = self
            .inner
            .get(order_id.clone())
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.clone()))?;
        if !order.contains_product(&product_id) {
            return Err(OrderError::ValidationError(format!(
                "Order {} does not contain product {}",
                order_id, product_id
            )));
        }
        if order.status != OrderStatus::Delivered || order.reviewed {
            warn!(
                status = %order.status,
                reviewed = order.reviewed,
                "Review submitted outside the delivered, unreviewed state"
            );
        }

        let params = ReviewCreate {
            product_id,
            order_id: order_id.clone(),
            farmer_id: order.farmer_id,
            rating,
            text,
        };
        let review_id = self.review_client.create_review(params).await.map_err(|e| match e {
            ReviewError::InvalidRating(_) | ReviewError::ValidationError(_) => {
                OrderError::ValidationError(e.to_string())
            }
            other => OrderError::ActorCommunicationError(other.to_string()),
        })?;

        self.inner.perform_action(order_id, OrderAction::MarkReviewed).await?;
        info!(review_id = %review_id, "Review submitted");
        Ok(review_id)
    }
}

crate::impl_client_methods!(OrderClient, Order, OrderError, order);
