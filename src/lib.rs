//! Farmer/vendor agricultural marketplace: accounts, catalog, cart, per-vendor
//! checkout, order tracking, reviews and chat over in-process collection actors.

pub mod actor_framework;
pub mod app_system;
pub mod auth;
pub mod catalog;
pub mod chat;
pub mod checkout;
pub mod clients;
pub mod domain;
pub mod geo;
pub mod preferences;

pub mod cart_actor;
pub mod chat_actor;
pub mod order_actor;
pub mod product_actor;
pub mod review_actor;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;
