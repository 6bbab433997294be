//! Database connection and operations

pub mod books;
pub mod schema_sync;
pub mod seed;
pub mod sqlite_helpers;

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, warn};

pub use books::{BookRecord, BookRepository, CreateBook, UpdateBook};
pub use seed::{SeedMode, SeedResult};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Build a pool without opening any connection.
    ///
    /// Connection failures surface on first use, so a broken database never
    /// prevents the server from starting.
    pub fn connect_lazy(url: &str, max_connections: u32) -> Result<Self> {
        let options = connect_options(url)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    /// Create a new database connection pool
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = connect_options(url)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database {}", url))?;

        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get a books repository
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.pool.clone())
    }

    /// Sync the schema and apply the seed policy
    pub async fn initialize(&self, mode: SeedMode) -> Result<SeedResult> {
        info!(seed_mode = mode.as_str(), "Initializing database");
        let result = seed::run_seeds(self, mode).await?;

        if !result.schema.tables_created.is_empty() {
            info!(tables = ?result.schema.tables_created, "Created tables");
        }
        if !result.schema.columns_added.is_empty() {
            warn!(columns = ?result.schema.columns_added, "Added missing columns");
        }
        info!(rows_inserted = result.rows_inserted, "Database synchronized");

        Ok(result)
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Accept either a `sqlite:` URL or a bare file path
fn connect_options(url: &str) -> Result<SqliteConnectOptions> {
    let options = if url.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL {}", url))?
    } else {
        SqliteConnectOptions::new().filename(url)
    };

    Ok(options.create_if_missing(true))
}
