//! Store trait abstracting the persistence backend

use crate::error::Result;
use crate::types::{
    CartItem, CartItemId, NewCartItem, NewUser, Order, Product, ProductId, User,
};
use async_trait::async_trait;

/// Dependency-injected store interface.
///
/// The server constructs one implementation at startup and threads it
/// through the application state; there is no process-wide connection
/// singleton. Lookups that find nothing return `Ok(None)` / an empty
/// list — absence is not an error at this boundary.
#[async_trait]
pub trait Store: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Look up a user by email
    async fn find_user(&self, email: &str) -> Result<Option<User>>;

    /// Create a user record. Fails with `Duplicate` if the email is taken;
    /// callers wanting create-if-absent semantics check `find_user` first.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// All users with the customer role
    async fn list_customers(&self) -> Result<Vec<User>>;

    // ========================================================================
    // Products
    // ========================================================================

    /// One page of the catalog
    async fn list_products(&self, limit: u32, offset: u32) -> Result<Vec<Product>>;

    /// Total catalog size, for client-side page-count computation
    async fn count_products(&self) -> Result<u64>;

    /// Product by ID
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Insert a catalog entry (seeding)
    async fn create_product(&self, product: Product) -> Result<Product>;

    // ========================================================================
    // Cart
    // ========================================================================

    /// Add a cart entry
    async fn add_cart_item(&self, item: NewCartItem) -> Result<CartItem>;

    /// Cart entry by ID
    async fn get_cart_item(&self, id: &CartItemId) -> Result<Option<CartItem>>;

    /// All cart entries owned by `email`
    async fn cart_for(&self, email: &str) -> Result<Vec<CartItem>>;

    /// Remove a cart entry; returns whether a row was deleted
    async fn remove_cart_item(&self, id: &CartItemId) -> Result<bool>;

    // ========================================================================
    // Orders
    // ========================================================================

    /// Convert a cart entry into a paid order.
    ///
    /// Deletes the cart entry and inserts the order atomically; if either
    /// step fails, neither takes effect. Fails with `NotFound` when the
    /// cart entry does not exist.
    async fn checkout(&self, cart_item_id: &CartItemId) -> Result<Order>;

    /// Orders owned by `email`, newest first
    async fn orders_for(&self, email: &str) -> Result<Vec<Order>>;

    /// Every order in the store, newest first
    async fn all_orders(&self) -> Result<Vec<Order>>;
}
