use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart item not found: {0}")]
    NotFound(String),
    #[error("Minimum order quantity is {minimum}")]
    BelowMinimum { requested: u32, minimum: u32 },
    #[error("Maximum available quantity is {maximum}")]
    AboveMaximum { requested: u32, maximum: u32 },
    #[error("Please select a quantity")]
    ZeroQuantity,
    #[error("Product not available: {0}")]
    ProductUnavailable(String),
    #[error("Cart validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            FrameworkError::Rejected(msg) => CartError::ValidationError(msg),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
