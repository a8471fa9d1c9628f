//! Order queries and the checkout transaction

use crate::error::{Result, StorageError};
use ebazar_core::types::{CartItemId, Order, OrderId, ProductId, ORDER_STATUS_PAID};
use sqlx::{Row, SqlitePool};

fn row_to_order(row: &sqlx::sqlite::SqliteRow) -> Result<Order> {
    let order_time = chrono::DateTime::from_timestamp_millis(row.get::<i64, _>("order_time"))
        .ok_or_else(|| StorageError::Query("invalid order_time timestamp".to_string()))?;

    Ok(Order {
        id: OrderId::new(row.get::<String, _>("id")),
        email: row.get("email"),
        product_id: ProductId::new(row.get::<String, _>("product_id")),
        product_name: row.get("product_name"),
        price: row.get("price"),
        status: row.get("status"),
        order_time,
    })
}

/// Insert an order row as-is. Checkout goes through [`checkout`]; this
/// is for seeding and tests.
pub async fn insert(pool: &SqlitePool, order: &Order) -> Result<()> {
    sqlx::query(
        "INSERT INTO orders (id, email, product_id, product_name, price, status, order_time)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id.as_str())
    .bind(&order.email)
    .bind(order.product_id.as_str())
    .bind(&order.product_name)
    .bind(order.price)
    .bind(&order.status)
    .bind(order.order_time.timestamp_millis())
    .execute(pool)
    .await?;

    Ok(())
}

/// Convert a cart entry into a paid order.
///
/// The delete of the cart row and the insert of the order commit
/// together or not at all; a failure after the delete rolls the cart
/// entry back.
pub async fn checkout(pool: &SqlitePool, cart_item_id: &CartItemId) -> Result<Order> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        "SELECT id, email, product_id, product_name, price, added_at
         FROM cart_items WHERE id = ?",
    )
    .bind(cart_item_id.as_str())
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| StorageError::not_found("Cart item", cart_item_id.as_str()))?;

    let item = crate::cart::row_to_item(&row)?;

    sqlx::query("DELETE FROM cart_items WHERE id = ?")
        .bind(cart_item_id.as_str())
        .execute(&mut *tx)
        .await?;

    let order = Order {
        id: OrderId::generate(),
        email: item.email,
        product_id: item.product_id,
        product_name: item.product_name,
        price: item.price,
        status: ORDER_STATUS_PAID.to_string(),
        order_time: chrono::Utc::now(),
    };

    sqlx::query(
        "INSERT INTO orders (id, email, product_id, product_name, price, status, order_time)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id.as_str())
    .bind(&order.email)
    .bind(order.product_id.as_str())
    .bind(&order.product_name)
    .bind(order.price)
    .bind(&order.status)
    .bind(order.order_time.timestamp_millis())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(order)
}

/// Orders owned by `email`, newest first
pub async fn for_owner(pool: &SqlitePool, email: &str) -> Result<Vec<Order>> {
    let rows = sqlx::query(
        "SELECT id, email, product_id, product_name, price, status, order_time
         FROM orders WHERE email = ? ORDER BY order_time DESC",
    )
    .bind(email)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_order).collect()
}

/// Every order in the store, newest first
pub async fn all(pool: &SqlitePool) -> Result<Vec<Order>> {
    let rows = sqlx::query(
        "SELECT id, email, product_id, product_name, price, status, order_time
         FROM orders ORDER BY order_time DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_order).collect()
}
