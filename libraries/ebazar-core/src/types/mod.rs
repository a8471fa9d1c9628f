/// Domain types for E-Bazar
mod cart;
mod ids;
mod order;
mod product;
mod user;

pub use cart::{CartItem, NewCartItem};
pub use ids::{CartItemId, OrderId, ProductId};
pub use order::{Order, ORDER_STATUS_PAID};
pub use product::Product;
pub use user::{NewUser, Role, User};
