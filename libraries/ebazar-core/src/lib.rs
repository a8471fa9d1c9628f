//! E-Bazar Core
//!
//! Domain types and the store abstraction shared by the storage layer
//! and the HTTP server.

pub mod error;
pub mod storage;
pub mod types;

pub use error::{CoreError, Result};
pub use storage::Store;
pub use types::{
    CartItem, CartItemId, NewCartItem, NewUser, Order, OrderId, Product, ProductId, Role, User,
    ORDER_STATUS_PAID,
};
