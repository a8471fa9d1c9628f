//! E-Bazar Storage
//!
//! SQLite persistence layer for the E-Bazar server. Each feature owns
//! its queries in a vertical slice; the [`Database`] handle ties them
//! together behind the `ebazar_core::Store` trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use ebazar_storage::Database;
//! use ebazar_core::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("sqlite://ebazar.db").await?;
//! let total = db.count_products().await?;
//! # Ok(())
//! # }
//! ```

mod database;
mod error;

// Vertical slices
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

pub use database::Database;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations.
///
/// Called once at startup (and by `Database::new`) to bring the schema
/// up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
