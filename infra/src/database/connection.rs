//! Database connection pool management.
//!
//! Connection pooling via sqlx with settings from [`DatabaseConfig`].
//! Schema migrations are applied out of band (see `infra/migrations/`);
//! the pool only verifies connectivity.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use todo_shared::config::DatabaseConfig;

/// Create the Postgres connection pool.
///
/// Connections are tested before being handed out, so a dead database
/// surfaces as an acquire error rather than a failed query mid-request.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        "Creating database connection pool (max_connections: {})",
        config.max_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .test_before_acquire(true)
        .connect(&config.url)
        .await?;

    info!("Database connected successfully");
    Ok(pool)
}
