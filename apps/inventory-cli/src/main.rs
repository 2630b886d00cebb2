//! # Inventory Manager CLI
//!
//! Console menu for adding, listing, updating, deleting, searching and
//! reporting on products stored in a local SQLite file.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CLI Startup                                      │
//! │                                                                         │
//! │  1. init_tracing()        RUST_LOG → stderr                             │
//! │  2. CliConfig::load()     env vars + --db flag                          │
//! │  3. Database::open()      file, one connection, products table          │
//! │     + health_check()      SELECT 1                                      │
//! │       └── failure → message on stderr, exit status 1                    │
//! │  4. Shell::run()          menu loop on stdin/stdout                     │
//! │  5. Database::close()     on Exit or end of input                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Running
//! ```bash
//! cargo run -p inventory-cli
//! cargo run -p inventory-cli -- --db ./data/inventory.db
//! RUST_LOG=inventory=debug cargo run -p inventory-cli
//! ```

mod config;
mod shell;

use std::io;
use std::process::ExitCode;

use inventory_db::Database;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, USAGE};
use crate::shell::Shell;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    if config.show_help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    info!(
        db_path = %config.db_path.display(),
        connect_timeout_secs = config.connect_timeout_secs,
        "Starting inventory manager"
    );

    let db = match Database::open(config.db_config()).await {
        Ok(db) => db,
        Err(e) if e.is_fatal() => {
            error!(error = %e, "Failed to open inventory database");
            eprintln!("Can't open database: {}", e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!(error = %e, "Store opened but schema check failed");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !db.health_check().await {
        error!(path = %db.path().display(), "Store does not answer queries");
        eprintln!("Can't open database: {} does not answer queries", db.path().display());
        db.close().await;
        return ExitCode::FAILURE;
    }
    println!("Opened database successfully");

    let result = Shell::new(&db, io::stdin().lock(), io::stdout().lock(), io::stderr())
        .run()
        .await;

    db.close().await;

    match result {
        Ok(()) => {
            println!("Database connection closed.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Console I/O failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs the fmt subscriber. Logs go to stderr so they never land
/// inside the tables printed on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,inventory=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
