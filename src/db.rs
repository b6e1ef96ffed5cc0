use std::time::Duration;

use log::{debug, info, warn};
use sqlx::migrate::MigrateDatabase;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Postgres,
};
use thiserror::Error;

use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Failed to create database: {0}")]
    DatabaseCreationFailed(String),
}

pub type DbResult<T> = Result<T, DatabaseError>;

/// Owned handle to the connection pool. Opened once in `app::server`,
/// shared with the repository, closed after the HTTP server stops.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        info!("Initializing database connection");
        debug!(
            "Database configuration: max_conn={}, min_conn={}, timeout={}s",
            config.max_connections, config.min_connections, config.connect_timeout_seconds
        );

        if !config.skip_db_exists_check {
            Self::ensure_database_exists(config).await?;
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                DatabaseError::ConnectionError(e)
            })?;

        info!("Successfully connected to database");

        if config.use_migrations {
            Self::run_migrations(&pool).await?;
        }

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ensure the target database exists, create it if allowed
    async fn ensure_database_exists(config: &DatabaseConfig) -> DbResult<()> {
        let url = &config.url;
        let db_name = extract_db_name_from_url(url).ok_or_else(|| {
            DatabaseError::DatabaseNotFound(
                "Could not extract database name from connection string".to_string(),
            )
        })?;

        debug!("Checking if database '{}' exists", db_name);

        let db_exists = Postgres::database_exists(url)
            .await
            .map_err(DatabaseError::ConnectionError)?;

        if db_exists {
            debug!("Database '{}' exists", db_name);
            return Ok(());
        }

        if !config.create_database_if_missing {
            return Err(DatabaseError::DatabaseNotFound(format!(
                "Database '{}' does not exist",
                db_name
            )));
        }

        info!("Database '{}' does not exist, creating it", db_name);
        Postgres::create_database(url).await.map_err(|err| {
            DatabaseError::DatabaseCreationFailed(format!(
                "Failed to create database '{}': {}",
                db_name, err
            ))
        })?;
        info!("Successfully created database '{}'", db_name);

        Ok(())
    }

    async fn run_migrations(pool: &PgPool) -> DbResult<()> {
        info!("Running database migrations");

        match sqlx::migrate!("./migrations").run(pool).await {
            Ok(_) => {
                info!("Database migrations completed successfully");
                Ok(())
            }
            Err(e) => {
                warn!("Database migration error: {}", e);
                Err(DatabaseError::MigrationError(e.to_string()))
            }
        }
    }

    /// Gracefully close the database connection pool
    pub async fn shutdown(&self) {
        info!("Shutting down database connection pool...");

        let used_connections = self.pool.size();
        let idle_connections = self.pool.num_idle();

        self.pool.close().await;

        info!(
            "Database connection pool closed. Stats: {} active, {} idle connections released",
            used_connections, idle_connections
        );
    }
}

/// Extract the database name from a PostgreSQL connection string
fn extract_db_name_from_url(url: &str) -> Option<String> {
    // scheme://authority/name?params
    let (_, rest) = url.split_once("://")?;
    let (_, path) = rest.split_once('/')?;
    let db_name = path.split('?').next()?;

    if db_name.is_empty() {
        return None;
    }

    Some(db_name.to_string())
}
