//! User queries

use crate::error::{Result, StorageError};
use ebazar_core::types::{NewUser, Role, User};
use sqlx::{Row, SqlitePool};

pub(crate) fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
    let role_str: String = row.get("role");
    let role: Role = role_str
        .parse()
        .map_err(|e: String| StorageError::Query(e))?;

    let created_at = chrono::DateTime::from_timestamp_millis(row.get::<i64, _>("created_at"))
        .ok_or_else(|| StorageError::Query("invalid created_at timestamp".to_string()))?;

    Ok(User {
        email: row.get("email"),
        name: row.get("name"),
        role,
        created_at,
    })
}

/// Look up a user by email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query("SELECT email, name, role, created_at FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(row_to_user).transpose()
}

/// Insert a user record.
///
/// A second insert with the same email fails with `Duplicate` and
/// leaves the stored record untouched.
pub async fn insert(pool: &SqlitePool, user: NewUser) -> Result<User> {
    let created_at = chrono::Utc::now();

    sqlx::query("INSERT INTO users (email, name, role, created_at) VALUES (?, ?, ?, ?)")
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(created_at.timestamp_millis())
        .execute(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StorageError::Duplicate(user.email.clone())
            }
            _ => StorageError::Database(e),
        })?;

    Ok(User {
        email: user.email,
        name: user.name,
        role: user.role,
        created_at,
    })
}

/// All users with the given role, ordered by email
pub async fn list_by_role(pool: &SqlitePool, role: Role) -> Result<Vec<User>> {
    let rows =
        sqlx::query("SELECT email, name, role, created_at FROM users WHERE role = ? ORDER BY email")
            .bind(role.as_str())
            .fetch_all(pool)
            .await?;

    rows.iter().map(row_to_user).collect()
}
