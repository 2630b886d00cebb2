//! # Interactive Shell
//!
//! The numbered menu loop that drives the product repository.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Menu Loop                                       │
//! │                                                                         │
//! │  show menu ──► read choice (1-8, re-prompt otherwise)                  │
//! │                    │                                                    │
//! │     ┌──────────────┼───────────────┬──────────────┬────────────────┐   │
//! │     ▼              ▼               ▼              ▼                ▼   │
//! │  1 Add        2 View        3 Update / 4 Delete  5 Search / 6 Filter │
//! │  prompts      render        view, prompt id,     prompt, render     │
//! │  create       table         WriteOutcome         Listing            │
//! │                                                                         │
//! │  7 Report ──► render_summary        8 Exit / EOF ──► leave loop        │
//! │                                                                         │
//! │  Store errors: "Error: ..." on the error stream, back to the menu      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The shell is generic over its input and output streams; `main` hands
//! it the locked stdin/stdout, tests hand it byte buffers.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use inventory_core::validation::{
    validate_price, validate_product_id, validate_product_name, validate_quantity,
    validate_search_term, validate_threshold, ValidationResult,
};
use inventory_core::{
    render_listing, render_summary, render_table, NewProduct, ValidationError, WriteOutcome,
};
use inventory_db::{Database, DbError};
use tracing::{debug, warn};

const MENU: &str = "\n--- Inventory Management Menu ---
1. Add Product
2. View All Products
3. Update Product
4. Delete Product
5. Search Products by Name
6. Filter Products by Quantity
7. Generate Report
8. Exit
Enter your choice: ";

const INVALID_CHOICE: &str = "Invalid choice. Please enter a number between 1 and 8: ";
const INVALID_ID: &str = "Invalid input. Please enter a positive number for ID: ";
const INVALID_QUANTITY: &str = "Invalid input. Please enter a non-negative number for quantity: ";
const INVALID_PRICE: &str = "Invalid input. Please enter a non-negative number for price: ";
const INVALID_THRESHOLD: &str = "Invalid input. Please enter a non-negative number: ";

/// What the loop does after a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Option 8, or the input ran out mid-prompt.
    Exit,
}

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    View,
    Update,
    Delete,
    Search,
    Filter,
    Report,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Add),
            "2" => Ok(MenuChoice::View),
            "3" => Ok(MenuChoice::Update),
            "4" => Ok(MenuChoice::Delete),
            "5" => Ok(MenuChoice::Search),
            "6" => Ok(MenuChoice::Filter),
            "7" => Ok(MenuChoice::Report),
            "8" => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

/// Menu-driven session over an open [`Database`].
pub struct Shell<'a, R, W, E> {
    db: &'a Database,
    input: R,
    out: W,
    err: E,
}

impl<'a, R: BufRead, W: Write, E: Write> Shell<'a, R, W, E> {
    pub fn new(db: &'a Database, input: R, out: W, err: E) -> Self {
        Self { db, input, out, err }
    }

    /// Runs the menu until Exit is chosen or the input ends.
    ///
    /// Only I/O failures on the streams themselves are returned; store
    /// errors are reported and the loop carries on.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.prompt(MENU)?;

            let choice = match self.read_parsed::<MenuChoice, _>(INVALID_CHOICE, |_| Ok(()))? {
                Some(choice) => choice,
                None => break,
            };
            debug!(?choice, "Menu choice");

            let flow = match choice {
                MenuChoice::Add => self.add_product().await?,
                MenuChoice::View => self.view_products().await?,
                MenuChoice::Update => self.update_product().await?,
                MenuChoice::Delete => self.delete_product().await?,
                MenuChoice::Search => self.search_products().await?,
                MenuChoice::Filter => self.filter_products().await?,
                MenuChoice::Report => self.report().await?,
                MenuChoice::Exit => {
                    writeln!(self.out, "Exiting program.")?;
                    Flow::Exit
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        self.out.flush()
    }

    // =========================================================================
    // Menu Actions
    // =========================================================================

    async fn add_product(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Add New Product ---")?;

        let Some(product) = self.read_product_details()? else {
            return Ok(Flow::Exit);
        };

        match self.db.products().create(&product).await {
            Ok(created) => writeln!(
                self.out,
                "Product '{}' added successfully (ID {}).",
                created.name, created.id
            )?,
            Err(e) => self.report_error(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn view_products(&mut self) -> io::Result<Flow> {
        match self.db.products().list_all().await {
            Ok(listing) => {
                write!(self.out, "\n{}", render_table("Current Inventory", listing.rows()))?
            }
            Err(e) => self.report_error(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn update_product(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Update Product ---")?;
        self.view_products().await?;

        self.prompt("Enter Product ID to update: ")?;
        let Some(id) = self.read_parsed(INVALID_ID, validate_product_id)? else {
            return Ok(Flow::Exit);
        };

        match self.db.products().find_by_id(id).await {
            Ok(Some(current)) => write!(
                self.out,
                "\n{}",
                render_table("Product to Update", std::slice::from_ref(&current))
            )?,
            Ok(None) => {
                writeln!(self.out, "No product found with ID {}.", id)?;
                return Ok(Flow::Continue);
            }
            Err(e) => {
                self.report_error(&e)?;
                return Ok(Flow::Continue);
            }
        }

        let Some(product) = self.read_product_details()? else {
            return Ok(Flow::Exit);
        };

        match self.db.products().update(id, &product).await {
            Ok(WriteOutcome::Applied) => writeln!(self.out, "Product updated successfully.")?,
            Ok(WriteOutcome::NotFound { id }) => {
                writeln!(self.out, "No product found with ID {}.", id)?
            }
            Err(e) => self.report_error(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn delete_product(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Delete Product ---")?;
        self.view_products().await?;

        self.prompt("Enter Product ID to delete: ")?;
        let Some(id) = self.read_parsed(INVALID_ID, validate_product_id)? else {
            return Ok(Flow::Exit);
        };

        match self.db.products().delete(id).await {
            Ok(WriteOutcome::Applied) => writeln!(self.out, "Product deleted successfully.")?,
            Ok(WriteOutcome::NotFound { id }) => {
                writeln!(self.out, "No product found with ID {}.", id)?
            }
            Err(e) => self.report_error(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn search_products(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Search Products by Name ---")?;

        let term = loop {
            self.prompt("Enter search term: ")?;
            let Some(line) = self.read_line()? else {
                return Ok(Flow::Exit);
            };
            match validate_search_term(&line) {
                Ok(term) => break term,
                Err(ValidationError::Required { .. }) => {
                    writeln!(self.out, "Search term cannot be empty.")?
                }
                Err(e) => writeln!(self.out, "Invalid search term: {}.", e)?,
            }
        };

        match self.db.products().search_by_name(&term).await {
            Ok(listing) => write!(
                self.out,
                "\n{}",
                render_listing(
                    &format!("Search Results for \"{}\"", term),
                    &listing,
                    &format!("No products found matching \"{}\".", term),
                )
            )?,
            Err(e) => self.report_error(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn filter_products(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Filter Products by Quantity ---")?;

        self.prompt("Enter maximum quantity threshold: ")?;
        let Some(threshold) = self.read_parsed(INVALID_THRESHOLD, validate_threshold)? else {
            return Ok(Flow::Exit);
        };

        match self.db.products().filter_by_quantity(threshold).await {
            Ok(listing) => write!(
                self.out,
                "\n{}",
                render_listing(
                    &format!("Products with Quantity Less Than {}", threshold),
                    &listing,
                    &format!("No products found with quantity less than {}.", threshold),
                )
            )?,
            Err(e) => self.report_error(&e)?,
        }

        Ok(Flow::Continue)
    }

    async fn report(&mut self) -> io::Result<Flow> {
        match self.db.products().summary().await {
            Ok(summary) => write!(self.out, "\n{}", render_summary(&summary))?,
            Err(e) => self.report_error(&e)?,
        }

        Ok(Flow::Continue)
    }

    // =========================================================================
    // Prompts
    // =========================================================================

    /// Asks for name, quantity and price. `None` when the input ends.
    fn read_product_details(&mut self) -> io::Result<Option<NewProduct>> {
        let name = loop {
            self.prompt("Enter Product Name: ")?;
            let Some(name) = self.read_line()? else {
                return Ok(None);
            };
            match validate_product_name(&name) {
                Ok(()) => break name,
                Err(ValidationError::Required { .. }) => writeln!(
                    self.out,
                    "Product name cannot be empty. Please try again."
                )?,
                Err(e) => writeln!(self.out, "Invalid name: {}. Please try again.", e)?,
            }
        };

        self.prompt("Enter Quantity: ")?;
        let Some(quantity) = self.read_parsed(INVALID_QUANTITY, validate_quantity)? else {
            return Ok(None);
        };

        self.prompt("Enter Price: ")?;
        let Some(price) = self.read_parsed(INVALID_PRICE, validate_price)? else {
            return Ok(None);
        };

        Ok(Some(NewProduct::new(name, quantity, price)))
    }

    /// Reads lines until one parses as `T` and passes `check`, printing
    /// `retry` after each rejected line. `None` when the input ends.
    fn read_parsed<T, F>(&mut self, retry: &str, check: F) -> io::Result<Option<T>>
    where
        T: FromStr + Copy,
        F: Fn(T) -> ValidationResult<()>,
    {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            if let Ok(value) = line.trim().parse::<T>() {
                if check(value).is_ok() {
                    return Ok(Some(value));
                }
            }

            self.prompt(retry)?;
        }
    }

    /// One line without its terminator. `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced, so such a line reaches the
    /// usual parse and validation path and is re-prompted there.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            debug!("Input closed");
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    fn report_error(&mut self, error: &DbError) -> io::Result<()> {
        warn!(error = %error, "Operation failed, returning to menu");
        writeln!(self.err, "Error: {}", error)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
