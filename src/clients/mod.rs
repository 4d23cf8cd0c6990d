//! Typed clients over the collection actors, one per screen-level concern.

pub mod macros;
pub mod user_client;
pub mod product_client;
pub mod cart_client;
pub mod order_client;
pub mod review_client;
pub mod chat_client;
pub mod catalog_client;
pub mod dashboard_client;

pub use user_client::UserClient;
pub use product_client::ProductClient;
pub use cart_client::CartClient;
pub use order_client::OrderClient;
pub use review_client::ReviewClient;
pub use chat_client::ChatClient;
pub use catalog_client::{CatalogClient, ProductDetails};
pub use dashboard_client::{DashboardClient, VendorStats};
