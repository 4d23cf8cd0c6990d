//! Cart line items, one subcollection per user.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
