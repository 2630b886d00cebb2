//! # Seed Data Generator
//!
//! Populates an empty store with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p inventory-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p inventory-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p inventory-db --bin seed -- --db ./data/inventory.db
//! ```
//!
//! Each product is `{base name} {size}` with a deterministic quantity
//! (0 - 120) and price ($0.99 - $24.99), so low-stock filters and the
//! report have something to show.

use std::env;
use std::process::ExitCode;

use inventory_core::NewProduct;
use inventory_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Base product names.
const NAMES: &[&str] = &[
    "Widget",
    "Gadget",
    "Sprocket",
    "Bolt",
    "Hex Nut",
    "Washer",
    "Bearing",
    "Hinge",
    "Bracket",
    "Spring",
    "Gear",
    "Pulley",
    "Cable Tie",
    "Rivet",
    "Gasket",
    "Fuse",
    "Relay",
    "Switch",
    "Valve",
    "Clamp",
];

/// Size variants with a price add-on in cents.
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 150),
    ("Large", 300),
    ("XL", 500),
    ("Pack of 10", 900),
    ("Pack of 50", 1500),
];

const DEFAULT_COUNT: usize = 200;
const DEFAULT_DB: &str = "./inventory.db";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path = String::from(DEFAULT_DB);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Inventory Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: {DEFAULT_DB})");
                println!("  -h, --help         Show this help message");
                return ExitCode::SUCCESS;
            }
            _ => {}
        }
        i += 1;
    }

    println!("Inventory Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = match Database::open(DbConfig::new(&db_path)).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Can't open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let existing = match db.products().count().await {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Failed to count products: {}", e);
            db.close().await;
            return ExitCode::FAILURE;
        }
    };
    if existing > 0 {
        println!("Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        db.close().await;
        return ExitCode::SUCCESS;
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let product = generate_product(seed);

        if let Err(e) = db.products().create(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }

        generated += 1;
        if generated % 100 == 0 {
            println!("  Generated {} products...", generated);
        }
    }

    println!();
    println!("Generated {} products in {:?}", generated, start.elapsed());

    match db.products().summary().await {
        Ok(summary) => println!(
            "Store now holds {} products worth {}",
            summary.total_products,
            inventory_core::format_price(summary.total_value)
        ),
        Err(e) => eprintln!("Failed to summarize: {}", e),
    }

    db.close().await;
    ExitCode::SUCCESS
}

/// Generates one deterministic product from its sequence number.
fn generate_product(seed: usize) -> NewProduct {
    let name = NAMES[seed % NAMES.len()];
    let (size, addon_cents) = SIZES[(seed / NAMES.len()) % SIZES.len()];
    let batch = seed / (NAMES.len() * SIZES.len());

    let full_name = if batch == 0 {
        format!("{} {}", name, size)
    } else {
        format!("{} {} #{}", name, size, batch + 1)
    };

    // $0.99 - $9.98 base plus the size add-on
    let price_cents = 99 + ((seed * 37) % 900) as i64 + addon_cents;
    let quantity = ((seed * 13) % 121) as i64;

    NewProduct::new(full_name, quantity, price_cents as f64 / 100.0)
}
