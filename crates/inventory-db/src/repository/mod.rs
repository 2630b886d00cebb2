//! # Repository Module
//!
//! Database repository implementations for the inventory manager.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI shell                                                             │
//! │       │                                                                 │
//! │       │  db.products().search_by_name("wid")                           │
//! │       ▼                                                                 │
//! │  ProductRepository<'_>   (borrows the open Database)                   │
//! │  ├── create / find_by_id / update / delete                             │
//! │  ├── stream_all / list_all                                             │
//! │  ├── search_by_name / filter_by_quantity                               │
//! │  └── summary / count                                                   │
//! │       │                                                                 │
//! │       │  Bound SQL statement                                            │
//! │       ▼                                                                 │
//! │  SQLite products table                                                 │
//! │                                                                         │
//! │  Outcomes come back typed: Product, Listing, WriteOutcome,             │
//! │  InventorySummary, or a classified DbError.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD, search, filter, report

pub mod product;
