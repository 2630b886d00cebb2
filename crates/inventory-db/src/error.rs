//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error, native result code)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError::classify(operation, err) ← Adds context and categorization   │
//! │       │                                                                 │
//! │       ├── PrepareFailed / BindFailed / ExecFailed  (operation errors)  │
//! │       └── ConnectionFailed / SchemaFailed          (fatal at startup)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CLI prints "Error: ..." and returns to the menu                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "No row has this id" is not in here: update and delete report it as
//! [`inventory_core::WriteOutcome::NotFound`].

use inventory_core::ValidationError;
use thiserror::Error;

// SQLite reports both compile failures and some runtime failures
// (integer overflow, RAISE(FAIL)) as SQLITE_ERROR; these message prefixes
// only come out of sqlite3_prepare.
const COMPILE_MESSAGES: &[&str] = &[
    "no such table",
    "no such column",
    "no such function",
    "near \"",
    "syntax error",
    "incomplete input",
    "unrecognized token",
    "ambiguous column name",
    "wrong number of arguments",
];

// SQLite primary result codes (the low byte of an extended code).
const SQLITE_ERROR: i32 = 1;
const SQLITE_CORRUPT: i32 = 11;
const SQLITE_SCHEMA: i32 = 17;
const SQLITE_MISMATCH: i32 = 20;
const SQLITE_RANGE: i32 = 25;
const SQLITE_NOTADB: i32 = 26;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The statement could not be compiled.
    ///
    /// ## When This Occurs
    /// - Malformed SQL text
    /// - The products table is missing
    /// - The database file is corrupt or not a database
    #[error("Failed to prepare {operation} statement: {message}")]
    PrepareFailed {
        operation: &'static str,
        message: String,
    },

    /// A parameter could not be bound.
    ///
    /// ## When This Occurs
    /// - Parameter type or count does not match the statement
    ///
    /// Points at a defect in a call site, not at operator input.
    #[error("Failed to bind {operation} parameters: {message}")]
    BindFailed {
        operation: &'static str,
        message: String,
    },

    /// The store rejected execution.
    ///
    /// ## When This Occurs
    /// - Constraint violation
    /// - Disk full, I/O error, read-only file
    /// - A row could not be decoded while stepping through results
    #[error("{operation} failed: {message}")]
    ExecFailed {
        operation: &'static str,
        message: String,
    },

    /// The record breaks an invariant; nothing was sent to the store.
    #[error("Invalid product: {0}")]
    Invalid(#[from] ValidationError),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created or opened
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema initialization failed.
    #[error("Schema initialization failed: {0}")]
    SchemaFailed(String),
}

impl DbError {
    /// Maps a store-native error raised while running `operation`.
    ///
    /// ## Error Mapping
    /// ```text
    /// Database(code ERROR, compile message)           → PrepareFailed
    /// Database(code CORRUPT | SCHEMA | NOTADB)         → PrepareFailed
    /// Database(code RANGE | MISMATCH)                  → BindFailed
    /// Database(code ERROR raised while stepping)      → ExecFailed
    /// Database(any other code)                         → ExecFailed
    /// Encode / TypeNotFound / parameter count protocol → BindFailed
    /// Other                                            → ExecFailed
    /// ```
    pub fn classify(operation: &'static str, err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                let primary = db_err
                    .code()
                    .and_then(|code| code.parse::<i32>().ok())
                    .map(|code| code & 0xff);

                match primary {
                    Some(SQLITE_ERROR) if is_compile_message(&message) => {
                        DbError::PrepareFailed { operation, message }
                    }
                    Some(SQLITE_CORRUPT | SQLITE_SCHEMA | SQLITE_NOTADB) => {
                        DbError::PrepareFailed { operation, message }
                    }
                    Some(SQLITE_RANGE | SQLITE_MISMATCH) => {
                        DbError::BindFailed { operation, message }
                    }
                    _ => DbError::ExecFailed { operation, message },
                }
            }

            sqlx::Error::Encode(e) => DbError::BindFailed {
                operation,
                message: e.to_string(),
            },

            sqlx::Error::TypeNotFound { type_name } => DbError::BindFailed {
                operation,
                message: format!("unknown parameter type {}", type_name),
            },

            sqlx::Error::Protocol(message) if message.contains("parameter") => {
                DbError::BindFailed { operation, message }
            }

            other => DbError::ExecFailed {
                operation,
                message: other.to_string(),
            },
        }
    }

    /// True for errors that leave the application without a usable store.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DbError::ConnectionFailed(_) | DbError::SchemaFailed(_)
        )
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::SchemaFailed(err.to_string())
    }
}

fn is_compile_message(message: &str) -> bool {
    COMPILE_MESSAGES
        .iter()
        .any(|prefix| message.starts_with(prefix))
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
