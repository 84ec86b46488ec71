//! Database connection pool and migration utilities.
//!
//! The checkout store lives in PostgreSQL: a `users` table written by the
//! checkout upsert and a `payments` table that is append-only.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Maximum number of pooled connections.
const MAX_CONNECTIONS: u32 = 5;

/// How long an operation may wait for a free connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Creates a PostgreSQL connection pool with configured settings.
///
/// Each persistence call checks a connection out of this pool, uses it and
/// releases it; no locks are held across calls.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Runs all pending database migrations from `./migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
