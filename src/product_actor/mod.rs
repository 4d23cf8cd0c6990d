//! Product-specific domain logic: publishing and stock levels.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
