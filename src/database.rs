//! # Database connection and migrations

use std::path::Path;
use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::DatabaseConfig;
use crate::error::{ApiError, Result};

/// Open a connection pool for the configured database. For file-backed
/// SQLite databases the parent directory is created first.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    ensure_sqlite_path(&config.url)?;

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Ok(db)
}

/// Apply all pending migrations.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None).await?;
    Ok(())
}

fn ensure_sqlite_path(url: &str) -> Result<()> {
    if let Some(path) = url.strip_prefix("sqlite://")
        && !path.contains(":memory:")
    {
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::internal(format!(
                    "failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
            tracing::info!(directory = %parent.display(), "created database directory");
        }
    }
    Ok(())
}
