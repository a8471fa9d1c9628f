/// Common test utilities and fixtures
use ebazar_storage::Database;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-secret-key";

/// Create an in-memory test database with migrations applied.
///
/// A single connection with no recycling: every connection to a SQLite
/// `:memory:` URL gets its own empty database, so the pool must never
/// hand out a second one.
pub async fn create_test_database() -> Arc<Database> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<std::time::Duration>)
        .max_lifetime(None::<std::time::Duration>)
        .connect(":memory:")
        .await
        .expect("connect to in-memory database");

    ebazar_storage::run_migrations(&pool)
        .await
        .expect("run migrations");

    Arc::new(Database::from_pool(pool))
}
