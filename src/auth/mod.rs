//! Identity provider stand-in and the signed-in session.

pub mod client;
pub mod credential;
pub mod error;

pub use client::*;
pub use credential::*;
pub use error::*;
