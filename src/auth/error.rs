use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),
    #[error("Email already in use: {0}")]
    EmailInUse(String),
    #[error("No account for {0}")]
    UnknownEmail(String),
    #[error("Reset token is invalid or already used")]
    InvalidResetToken,
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Profile error: {0}")]
    Profile(String),
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for AuthError {
    fn from(e: FrameworkError) -> Self {
        AuthError::ActorCommunicationError(e.to_string())
    }
}
