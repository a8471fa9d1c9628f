//! Product catalog queries

use crate::error::Result;
use ebazar_core::types::{Product, ProductId};
use sqlx::{Row, SqlitePool};

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Product {
    Product {
        id: ProductId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        price: row.get("price"),
        category: row.get("category"),
        description: row.get("description"),
        image_url: row.get("image_url"),
    }
}

/// One page of the catalog. The window is computed by the caller as
/// `offset = (page - 1) * limit`.
pub async fn page(pool: &SqlitePool, limit: u32, offset: u32) -> Result<Vec<Product>> {
    let rows = sqlx::query(
        "SELECT id, name, price, category, description, image_url
         FROM products ORDER BY rowid LIMIT ? OFFSET ?",
    )
    .bind(i64::from(limit))
    .bind(i64::from(offset))
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_product).collect())
}

/// Total number of catalog entries
pub async fn count(pool: &SqlitePool) -> Result<u64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    Ok(total.unsigned_abs())
}

/// Product by ID
pub async fn find_by_id(pool: &SqlitePool, id: &ProductId) -> Result<Option<Product>> {
    let row = sqlx::query(
        "SELECT id, name, price, category, description, image_url FROM products WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(row_to_product))
}

/// Insert a catalog entry
pub async fn insert(pool: &SqlitePool, product: Product) -> Result<Product> {
    sqlx::query(
        "INSERT INTO products (id, name, price, category, description, image_url)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(product.id.as_str())
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.category)
    .bind(&product.description)
    .bind(&product.image_url)
    .execute(pool)
    .await?;

    Ok(product)
}
