//! # inventory-core: Pure Domain Logic for the Inventory Manager
//!
//! Everything here is deterministic and free of I/O: the product record,
//! the rules a record must satisfy, and the text rendering used by the
//! terminal shell.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Inventory Manager Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  inventory-cli (menu loop)                      │   │
//! │  │     prompts ──► repository call ──► render ──► stdout           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ inventory-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐     ┌────────────┐     ┌─────────────┐         │   │
//! │  │   │   types   │     │ validation │     │    table    │         │   │
//! │  │   │  Product  │     │   rules    │     │  rendering  │         │   │
//! │  │   │  Summary  │     │   checks   │     │   reports   │         │   │
//! │  │   └───────────┘     └────────────┘     └─────────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               inventory-db (Database Layer)                     │   │
//! │  │           SQLite store, schema, product repository              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct, Listing, ...)
//! - [`error`] - Validation error type
//! - [`validation`] - Record invariants
//! - [`table`] - Fixed-width table and report rendering
//!
//! ## Example Usage
//!
//! ```rust
//! use inventory_core::{render_table, Product};
//!
//! let widget = Product::new(1, "Widget", 5, 1.0);
//! let text = render_table("Current Inventory", &[widget]);
//!
//! assert!(text.contains("| 1    | Widget"));
//! assert!(text.contains("$     1.00 |"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod table;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use table::{format_price, render_listing, render_summary, render_table};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest product name accepted, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Longest search term accepted, in characters.
pub const MAX_SEARCH_TERM_LEN: usize = 100;
