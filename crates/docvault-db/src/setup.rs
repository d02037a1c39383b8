//! Database setup and initialization

use anyhow::{Context, Result};
use docvault_core::VaultConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Schema migrations, embedded at compile time from `migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &VaultConfig) -> Result<SqlitePool> {
    tracing::info!("Connecting to database...");
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .context("Invalid database URL")?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected successfully"
    );

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
