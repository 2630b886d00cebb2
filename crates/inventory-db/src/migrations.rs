//! # Schema Initializer
//!
//! Makes sure the `products` table exists before the menu is shown.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Initialization                              │
//! │                                                                         │
//! │  Database::open                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (created on first run)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  001_create_products.sql                                               │
//! │       ├── already applied?  → nothing to do                            │
//! │       └── pending?          → CREATE TABLE IF NOT EXISTS products      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Menu loop starts                                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The DDL uses `IF NOT EXISTS`, so a store whose table was created by an
//! earlier build (without a `_sqlx_migrations` record) is adopted as is.
//! There is a single migration; the schema never evolves beyond
//! create-if-absent.

use sqlx::SqlitePool;
use tracing::{error, info};

use crate::error::{DbError, DbResult};

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Ensures the products table exists.
///
/// ## Safety
/// - Idempotent: safe to run on every startup
/// - Any failure is fatal for the caller ([`DbError::SchemaFailed`])
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Ensuring products table");

    MIGRATOR.run(pool).await.map_err(|e| {
        error!(error = %e, "Schema initialization failed");
        DbError::from(e)
    })?;

    let (embedded, applied) = schema_status(pool).await?;
    info!(embedded, applied, "Schema ready");
    Ok(())
}

/// Returns `(embedded, applied)` migration counts.
pub async fn schema_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .map_err(|e| DbError::classify("schema status", e))?;

    Ok((total, applied as usize))
}

// =============================================================================
// Unit Tests
// =============================================================================
