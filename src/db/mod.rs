//! Database module providing connection pooling, migrations, and queries.

pub mod admins;
pub mod attendance;
pub mod catalog;
pub mod observations;
pub mod projects;
pub mod reports;
pub mod sessions;

use std::path::Path;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::DatabaseSettings;
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Database connection pool wrapper.
///
/// `DatabaseConnection` is itself a pool handle, so cloning is cheap and every
/// handler acquires and releases connections per statement.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Open the pool described by the settings.
    pub async fn new(settings: &DatabaseSettings) -> AppResult<Self> {
        if let Some(path) = sqlite_file_path(&settings.url)
            && let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Database(format!("Failed to create database directory: {}", e))
            })?;
        }

        let mut opt = ConnectOptions::new(settings.url.clone());
        opt.max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .sqlx_logging(false);

        // An in-memory database lives only as long as its connection.
        if sqlite_file_path(&settings.url).is_some() {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(settings.max_lifetime_secs));
        }

        // sqlx turns on `foreign_keys` for every pooled SQLite connection.
        let conn = Database::connect(opt)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        Ok(Self { conn })
    }

    /// Apply all pending migrations (schema and seed data).
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations complete");
        Ok(())
    }

    /// Borrow the pooled connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Cheap connectivity probe used by the readiness endpoint.
    pub async fn ping(&self) -> AppResult<()> {
        self.conn.ping().await?;
        Ok(())
    }
}

/// Extract the file path from a `sqlite://` URL, `None` for in-memory databases.
fn sqlite_file_path(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" || path.contains("mode=memory") {
        None
    } else {
        Some(path)
    }
}
