use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::migrations::Migrator;

pub type DbConn = DatabaseConnection;

/// Connect to the configured tracker database and bring its schema up to date
pub async fn connect() -> Result<DbConn> {
    connect_with_url(&CONFIG.database.database_url).await
}

/// Connect to `database_url` and run pending migrations
pub async fn connect_with_url(database_url: &str) -> Result<DbConn> {
    tracing::info!("Connecting to tracker database...");

    let db = Database::connect(connect_options(database_url))
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))?;

    Migrator::up(&db, None)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to run migrations: {}", e)))?;
    tracing::info!("Tracker schema is up to date");

    Ok(db)
}

/// Pool sizing per backend. The workload is a handful of admins writing and
/// one full-list read per change per live view.
pub fn connect_options(database_url: &str) -> ConnectOptions {
    let mut opts = ConnectOptions::new(database_url);
    opts.sqlx_logging(false);

    if database_url.starts_with("sqlite") {
        if database_url.contains(":memory:") || database_url.contains("mode=memory") {
            // Each connection would get its own empty in-memory database
            opts.max_connections(1).min_connections(1);
        } else {
            // SQLite serialises writers anyway
            opts.max_connections(4)
                .min_connections(1)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5));
        }
    } else {
        opts.max_connections(8)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300));
    }

    opts
}
