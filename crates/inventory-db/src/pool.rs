//! # Store Connection
//!
//! Opening, configuring and closing the SQLite store.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Connection Lifecycle                         │
//! │                                                                         │
//! │  CLI startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure the store                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::open(config).await ← Connect + ensure products table        │
//! │       │                          (failure here is fatal)               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │   Database (owned by main)              │                           │
//! │  │   └── SqlitePool, one connection        │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │  &Database passed to every operation                           │
//! │       ▼                                                                 │
//! │  db.products().create(..) / .update(..) / .summary() ...               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close().await ← Shutdown, consumes the handle                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The shell is strictly sequential, so the pool holds a single
//! connection: it plays the role of the one shared store handle while
//! sqlx takes care of preparing, caching and finalizing statements.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;

/// Path sentinel for a private in-memory store.
const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./inventory.db")
///     .connect_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 1 (one operation at a time)
    pub max_connections: u32,

    /// How long to wait for the store to open.
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Whether to ensure the schema on open.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a configuration for a file-backed store.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Every call yields a separate, empty store.
    pub fn in_memory() -> Self {
        DbConfig::new(IN_MEMORY)
    }

    /// Sets the maximum number of connections.
    ///
    /// Ignored for in-memory stores: every SQLite connection to
    /// `:memory:` opens its own empty database, so those always use one.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to ensure the schema on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// True when this configuration points at an in-memory store.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                // WAL: readers don't block the writer, better crash recovery
                .journal_mode(SqliteJournalMode::Wal)
        };

        Ok(options
            // Good balance of durability and speed
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// The open store: the single resource every repository operation borrows.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::open(DbConfig::new("inventory.db")).await?;
///
/// let created = db.products().create(&NewProduct::new("Widget", 5, 1.0)).await?;
/// let summary = db.products().summary().await?;
///
/// db.close().await;
/// ```
#[derive(Debug)]
pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    /// Opens the store and, unless disabled, ensures the schema.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite (WAL for files, NORMAL synchronous, foreign keys)
    /// 3. Creates a one-connection pool
    /// 4. Runs the schema initializer
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use store
    /// * `Err(DbError::ConnectionFailed)` - The store could not be opened
    /// * `Err(DbError::SchemaFailed)` - The products table could not be ensured
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening inventory database"
        );

        let connect_options = config.connect_options()?;
        debug!("Connection options configured");

        // Keep the one connection alive for the whole session: an
        // in-memory store disappears with its last connection.
        let max_connections = if config.is_in_memory() {
            1
        } else {
            config.max_connections.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database {
            pool,
            path: config.database_path,
        };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        info!("Database ready");
        Ok(db)
    }

    /// Ensures the products table exists.
    ///
    /// Idempotent; called by [`Database::open`] unless disabled in the
    /// config.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    ///
    /// For diagnostics and tests. Prefer repository methods.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Path the store was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the product repository, borrowing this store.
    pub fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(&self.pool)
    }

    /// Checks the store answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the store. Consumes the handle, so no operation can run
    /// afterwards.
    pub async fn close(self) {
        info!(path = %self.path.display(), "Closing inventory database");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
