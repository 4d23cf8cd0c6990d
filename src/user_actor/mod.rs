//! User documents: profile edits and role lookups.

pub mod entity;
pub mod error;

pub use error::*;
