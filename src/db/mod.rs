use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Embedded schema migrations, shared by the binary and the test suite
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a SQLite connection pool
///
/// `database_path` is either a filesystem path (created on first run) or the
/// `sqlite::memory:` URL used by the test suite.
pub async fn create_pool(database_path: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Creating database connection pool...");

    // Create parent directory if it doesn't exist
    if !database_path.starts_with("sqlite:") {
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    tracing::error!("Failed to create database directory: {}", e);
                    sqlx::Error::Io(e)
                })?;
            }
        }
    }

    let options = if database_path.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(database_path)?
    } else {
        SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}
