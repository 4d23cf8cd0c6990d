pub mod user;
pub mod product;
pub mod cart;
pub mod order;
pub mod review;
pub mod message;

pub use user::*;
pub use product::*;
pub use cart::*;
pub use order::*;
pub use review::*;
pub use message::*;
