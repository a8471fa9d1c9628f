/// Database handle implementing the core `Store` trait
use crate::error::Result;
use crate::{cart, orders, products, users, run_migrations};
use async_trait::async_trait;
use ebazar_core::types::{
    CartItem, CartItemId, NewCartItem, NewUser, Order, Product, ProductId, Role, User,
};
use ebazar_core::Store;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// SQLite-backed store.
///
/// Constructed once at startup and injected into the application state;
/// holds the only database handle in the process.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database at `database_url` and
    /// bring the schema up to date.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (for testing)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Store for Database {
    async fn find_user(&self, email: &str) -> ebazar_core::Result<Option<User>> {
        Ok(users::find_by_email(&self.pool, email).await?)
    }

    async fn create_user(&self, user: NewUser) -> ebazar_core::Result<User> {
        Ok(users::insert(&self.pool, user).await?)
    }

    async fn list_customers(&self) -> ebazar_core::Result<Vec<User>> {
        Ok(users::list_by_role(&self.pool, Role::Customer).await?)
    }

    async fn list_products(&self, limit: u32, offset: u32) -> ebazar_core::Result<Vec<Product>> {
        Ok(products::page(&self.pool, limit, offset).await?)
    }

    async fn count_products(&self) -> ebazar_core::Result<u64> {
        Ok(products::count(&self.pool).await?)
    }

    async fn get_product(&self, id: &ProductId) -> ebazar_core::Result<Option<Product>> {
        Ok(products::find_by_id(&self.pool, id).await?)
    }

    async fn create_product(&self, product: Product) -> ebazar_core::Result<Product> {
        Ok(products::insert(&self.pool, product).await?)
    }

    async fn add_cart_item(&self, item: NewCartItem) -> ebazar_core::Result<CartItem> {
        Ok(cart::insert(&self.pool, item).await?)
    }

    async fn get_cart_item(&self, id: &CartItemId) -> ebazar_core::Result<Option<CartItem>> {
        Ok(cart::find_by_id(&self.pool, id).await?)
    }

    async fn cart_for(&self, email: &str) -> ebazar_core::Result<Vec<CartItem>> {
        Ok(cart::for_owner(&self.pool, email).await?)
    }

    async fn remove_cart_item(&self, id: &CartItemId) -> ebazar_core::Result<bool> {
        Ok(cart::delete(&self.pool, id).await?)
    }

    async fn checkout(&self, cart_item_id: &CartItemId) -> ebazar_core::Result<Order> {
        Ok(orders::checkout(&self.pool, cart_item_id).await?)
    }

    async fn orders_for(&self, email: &str) -> ebazar_core::Result<Vec<Order>> {
        Ok(orders::for_owner(&self.pool, email).await?)
    }

    async fn all_orders(&self) -> ebazar_core::Result<Vec<Order>> {
        Ok(orders::all(&self.pool).await?)
    }
}
