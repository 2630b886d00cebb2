//! # Domain Types
//!
//! Core domain types used throughout the inventory manager.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │   NewProduct    │   │  InventorySummary   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (store)     │   │  name           │   │  total_products     │   │
//! │  │  name           │   │  quantity       │   │  total_value        │   │
//! │  │  quantity       │   │  price          │   └─────────────────────┘   │
//! │  │  price          │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Listing      │   │  WriteOutcome   │   Outcomes returned by the   │
//! │  │  Rows(Vec<_>)   │   │  Applied        │   repository instead of      │
//! │  │  Empty          │   │  NotFound { id }│   overloaded booleans        │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is assigned by the store on insert and never supplied by callers,
//! which is why creation takes a [`NewProduct`] rather than a [`Product`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{validate_price, validate_product_name, validate_quantity};

// =============================================================================
// Product
// =============================================================================

/// A persisted inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned identifier (positive, never reused).
    pub id: i64,

    /// Display name. Not unique.
    pub name: String,

    /// Units on hand.
    pub quantity: i64,

    /// Unit price.
    pub price: f64,
}

impl Product {
    /// Builds a product value. Used by tests and when echoing a freshly
    /// inserted row back to the caller.
    pub fn new(id: i64, name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Product {
            id,
            name: name.into(),
            quantity,
            price,
        }
    }
}

// =============================================================================
// New Product
// =============================================================================

/// A record without an id: the input of Create and Update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, quantity: i64, price: f64) -> Self {
        NewProduct {
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Checks the record invariants.
    ///
    /// ## Rules
    /// - name is non-blank and at most [`crate::MAX_NAME_LEN`] characters
    /// - quantity >= 0
    /// - price is finite and >= 0.0
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_product_name(&self.name)?;
        validate_quantity(self.quantity)?;
        validate_price(self.price)?;
        Ok(())
    }

    /// Attaches a store-assigned id.
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

// =============================================================================
// Inventory Summary
// =============================================================================

/// The aggregate report over every record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InventorySummary {
    /// Number of records in the table.
    pub total_products: i64,

    /// Σ(quantity × price). `0.0` for an empty table, never absent.
    pub total_value: f64,
}

// =============================================================================
// Outcomes
// =============================================================================

/// Result of a read-style operation (view, search, filter).
///
/// An empty result is a valid outcome, kept apart from both "not found"
/// and store errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    /// At least one matching record.
    Rows(Vec<Product>),

    /// The statement ran and matched nothing.
    Empty,
}

impl Listing {
    /// Chooses the variant from a collected result set.
    pub fn from_rows(rows: Vec<Product>) -> Self {
        if rows.is_empty() {
            Listing::Empty
        } else {
            Listing::Rows(rows)
        }
    }

    /// The records, empty slice for [`Listing::Empty`].
    pub fn rows(&self) -> &[Product] {
        match self {
            Listing::Rows(rows) => rows,
            Listing::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }
}

/// Result of a mutation that targets one row by id (update, delete).
///
/// Derived from the affected-row count: a statement that ran cleanly but
/// touched nothing is `NotFound`, never success.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Exactly one row changed.
    Applied,

    /// No row has this id.
    NotFound { id: i64 },
}

impl WriteOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
