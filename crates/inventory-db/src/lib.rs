//! # inventory-db: Database Layer for the Inventory Manager
//!
//! Stores inventory records in SQLite through sqlx and turns every
//! store-level result into a typed outcome.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Inventory Manager Data Flow                         │
//! │                                                                         │
//! │  CLI menu choice ("5. Search Products by Name")                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   inventory-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (product.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ open / close  │◄───│ ProductRepo   │    │ 001_create_  │  │   │
//! │  │   │ one connection│    │ Listing,      │    │ products.sql │  │   │
//! │  │   │               │    │ WriteOutcome  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     ./inventory.db                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Opening and closing the store
//! - [`migrations`] - Ensuring the products table
//! - [`error`] - Classified database errors
//! - [`repository`] - The product repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inventory_db::{Database, DbConfig};
//! use inventory_core::NewProduct;
//!
//! let db = Database::open(DbConfig::new("inventory.db")).await?;
//!
//! db.products().create(&NewProduct::new("Widget", 5, 1.0)).await?;
//! let matches = db.products().search_by_name("wid").await?;
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::product::ProductRepository;
