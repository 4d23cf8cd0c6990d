use thiserror::Error;

use crate::auth::AuthError;
use crate::cart_actor::CartError;
use crate::chat_actor::ChatError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::review_actor::ReviewError;
use crate::user_actor::UserError;

/// What the presentation layer distinguishes: an auth problem, something
/// missing, or anything else.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Operation failed: {0}")]
    Failure(String),
}

impl AppError {
    /// Generic text to show the user. Details only go to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "Please sign in and try again.",
            AppError::NotFound(_) => "We couldn't find what you were looking for.",
            AppError::Failure(_) => "Something went wrong. Please try again.",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::ActorCommunicationError(_) | AuthError::Hashing(_) => AppError::Failure(e.to_string()),
            other => AppError::Auth(other.to_string()),
        }
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => AppError::NotFound(e.to_string()),
            other => AppError::Failure(other.to_string()),
        }
    }
}

impl From<ProductError> for AppError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(_) => AppError::NotFound(e.to_string()),
            other => AppError::Failure(other.to_string()),
        }
    }
}

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::NotFound(_) => AppError::NotFound(e.to_string()),
            other => AppError::Failure(other.to_string()),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(_) => AppError::NotFound(e.to_string()),
            other => AppError::Failure(other.to_string()),
        }
    }
}

impl From<ReviewError> for AppError {
    fn from(e: ReviewError) -> Self {
        match e {
            ReviewError::NotFound(_) => AppError::NotFound(e.to_string()),
            other => AppError::Failure(other.to_string()),
        }
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::NotFound(_) => AppError::NotFound(e.to_string()),
            other => AppError::Failure(other.to_string()),
        }
    }
}
