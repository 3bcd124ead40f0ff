//! SQLite pool setup. Foreign keys are enforced on every pooled connection.

use crate::config::Settings;
use crate::error::AppError;
use crate::migration::apply_migrations;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open the pool for `settings.database_url`, creating the database file if missing.
/// An in-memory database lives only as long as its connection, so its pool never
/// retires idle connections.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let mut pool_options = SqlitePoolOptions::new().max_connections(settings.max_connections);
    if is_in_memory(&settings.database_url) {
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }
    let pool = pool_options.connect_with(options).await?;
    tracing::info!(database_url = %settings.database_url, "database connected");
    Ok(pool)
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(settings: &Settings) -> Result<SqlitePool, AppError> {
    let pool = connect(settings).await?;
    apply_migrations(&pool).await?;
    Ok(pool)
}
