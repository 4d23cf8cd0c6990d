use chrono::Utc;

use super::actions::{OrderAction, OrderActionResult};
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, PaymentStatus, QualityReview};

impl Order {
    fn apply_status(&mut self, to: OrderStatus) -> OrderActionResult {
        let from = self.status;
        let now = Utc::now();
        self.status = to;
        self.status_updated_at = Some(now);
        if to == OrderStatus::Delivered {
            self.delivered_at = Some(now);
        }
        OrderActionResult::StatusChanged { from, to }
    }
}

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from a checkout draft.
    ///
    /// The order starts `pending` with payment `pending`.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        if params.items.is_empty() {
            return Err("An order needs at least one item".to_string());
        }
        Ok(Self {
            id,
            farmer_id: params.farmer_id,
            vendor_id: params.vendor_id,
            items: params.items,
            status: OrderStatus::Pending,
            total_amount: params.total_amount,
            shipping_address: params.shipping_address,
            phone: params.phone,
            payment_status: PaymentStatus::Pending,
            reviewed: false,
            created_at: Utc::now(),
            status_updated_at: None,
            delivered_at: None,
            quality_review: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    /// Handles status changes and delivery reviews.
    ///
    /// Transitions are not validated here; whoever holds the order can write any
    /// status.
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, String> {
        match action {
            OrderAction::SetStatus(to) => Ok(self.apply_status(to)),
            OrderAction::SubmitQualityReview { images } => {
                let result = self.apply_status(OrderStatus::Delivered);
                self.quality_review = Some(QualityReview {
                    images,
                    has_quality_issue: true,
                    reviewed_at: Utc::now(),
                });
                Ok(result)
            }
            OrderAction::MarkReviewed => {
                self.reviewed = true;
                Ok(OrderActionResult::Reviewed)
            }
        }
    }
}
