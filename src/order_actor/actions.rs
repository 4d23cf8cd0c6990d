use crate::domain::OrderStatus;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Writes a new status. Any status is accepted.
    SetStatus(OrderStatus),
    /// Farmer accepts the delivery but attaches photos of a quality problem.
    SubmitQualityReview { images: Vec<String> },
    /// A product review has been written for this order.
    MarkReviewed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    StatusChanged { from: OrderStatus, to: OrderStatus },
    Reviewed,
}
