use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChatError {
    #[error("Message not found: {0}")]
    NotFound(String),
    #[error("Message validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ChatError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ChatError::NotFound(id),
            FrameworkError::Rejected(msg) => ChatError::ValidationError(msg),
            other => ChatError::ActorCommunicationError(other.to_string()),
        }
    }
}
