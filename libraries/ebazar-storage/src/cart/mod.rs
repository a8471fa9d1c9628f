//! Cart queries

use crate::error::{Result, StorageError};
use ebazar_core::types::{CartItem, CartItemId, NewCartItem, ProductId};
use sqlx::{Row, SqlitePool};

pub(crate) fn row_to_item(row: &sqlx::sqlite::SqliteRow) -> Result<CartItem> {
    let added_at = chrono::DateTime::from_timestamp_millis(row.get::<i64, _>("added_at"))
        .ok_or_else(|| StorageError::Query("invalid added_at timestamp".to_string()))?;

    Ok(CartItem {
        id: CartItemId::new(row.get::<String, _>("id")),
        email: row.get("email"),
        product_id: ProductId::new(row.get::<String, _>("product_id")),
        product_name: row.get("product_name"),
        price: row.get("price"),
        added_at,
    })
}

/// Add a cart entry owned by `item.email`
pub async fn insert(pool: &SqlitePool, item: NewCartItem) -> Result<CartItem> {
    let entry = CartItem {
        id: CartItemId::generate(),
        email: item.email,
        product_id: item.product_id,
        product_name: item.product_name,
        price: item.price,
        added_at: chrono::Utc::now(),
    };

    sqlx::query(
        "INSERT INTO cart_items (id, email, product_id, product_name, price, added_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(entry.id.as_str())
    .bind(&entry.email)
    .bind(entry.product_id.as_str())
    .bind(&entry.product_name)
    .bind(entry.price)
    .bind(entry.added_at.timestamp_millis())
    .execute(pool)
    .await?;

    Ok(entry)
}

/// Cart entry by ID
pub async fn find_by_id(pool: &SqlitePool, id: &CartItemId) -> Result<Option<CartItem>> {
    let row = sqlx::query(
        "SELECT id, email, product_id, product_name, price, added_at
         FROM cart_items WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_item).transpose()
}

/// All cart entries owned by `email`
pub async fn for_owner(pool: &SqlitePool, email: &str) -> Result<Vec<CartItem>> {
    let rows = sqlx::query(
        "SELECT id, email, product_id, product_name, price, added_at
         FROM cart_items WHERE email = ? ORDER BY added_at DESC",
    )
    .bind(email)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_item).collect()
}

/// Remove a cart entry; returns whether a row was deleted
pub async fn delete(pool: &SqlitePool, id: &CartItemId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
