//! # Table Rendering
//!
//! Turns records into the fixed-width text the terminal shell prints.
//! Pure functions: no stdout, no store access.
//!
//! ## Layout
//! ```text
//! --- Current Inventory ---
//! +-------+---------------------------+------------+------------+
//! | ID    | Name                      | Quantity   | Price      |
//! +-------+---------------------------+------------+------------+
//! | 1    | Widget                   |          5| $     1.00 |
//! +-------+---------------------------+------------+------------+
//! ```
//!
//! Column widths: id 5 (left), name 25 (left), quantity 10 (right),
//! price 9 (right, two decimals, after a `$` marker). Names longer than
//! 25 characters are printed in full and push the rest of the row right.

use crate::types::{InventorySummary, Listing, Product};

/// Horizontal rule shared by header and footer.
const BORDER: &str = "+-------+---------------------------+------------+------------+";

/// Column captions.
const HEADER: &str = "| ID    | Name                      | Quantity   | Price      |";

/// Notice printed under an empty table by [`render_table`].
pub const NO_RECORDS: &str = "No records found.";

/// Formats a price with the currency marker and exactly two decimals.
///
/// ```rust
/// use inventory_core::format_price;
///
/// assert_eq!(format_price(10.5), "$10.50");
/// assert_eq!(format_price(0.0), "$0.00");
/// ```
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Renders one data row.
fn render_row(product: &Product) -> String {
    format!(
        "| {:<5}| {:<25}| {:>10}| ${:>9.2} |",
        product.id, product.name, product.quantity, product.price
    )
}

/// Renders `rows` as a bordered table under a `--- title ---` line.
///
/// An empty slice still renders header and footer, followed by
/// [`NO_RECORDS`].
pub fn render_table(title: &str, rows: &[Product]) -> String {
    render_rows(title, rows, NO_RECORDS)
}

/// Renders a [`Listing`], using `empty_notice` when it matched nothing.
///
/// ## Example
/// ```rust
/// use inventory_core::{render_listing, Listing};
///
/// let text = render_listing("Search Results", &Listing::Empty, "No products found.");
/// assert!(text.ends_with("No products found.\n"));
/// ```
pub fn render_listing(title: &str, listing: &Listing, empty_notice: &str) -> String {
    render_rows(title, listing.rows(), empty_notice)
}

fn render_rows(title: &str, rows: &[Product], empty_notice: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("--- {} ---\n", title));
    out.push_str(BORDER);
    out.push('\n');
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(BORDER);
    out.push('\n');

    for product in rows {
        out.push_str(&render_row(product));
        out.push('\n');
    }

    out.push_str(BORDER);
    out.push('\n');

    if rows.is_empty() {
        out.push_str(empty_notice);
        out.push('\n');
    }

    out
}

/// Renders the aggregate report block.
pub fn render_summary(summary: &InventorySummary) -> String {
    format!(
        "--- Inventory Report ---\n\
         Total unique products: {}\n\
         Total inventory value: {}\n\
         ------------------------\n",
        summary.total_products,
        format_price(summary.total_value)
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_row_widths() {
        let row = render_row(&Product::new(7, "Widget", 5, 1.0));
        assert_eq!(
            row,
            "| 7    | Widget                   |          5| $     1.00 |"
        );
    }

    #[test]
    fn test_price_is_rounded_to_two_decimals() {
        let row = render_row(&Product::new(1, "Bolt", 1, 2.345_6));
        assert!(row.ends_with("$     2.35 |"), "got {row}");

        let row = render_row(&Product::new(1, "Crate", 1, 1234567.0));
        assert!(row.ends_with("$1234567.00 |"), "got {row}");
    }

    #[test]
    fn test_long_name_is_not_truncated() {
        let name = "An Exceptionally Long Product Name That Overflows";
        let row = render_row(&Product::new(3, name, 12, 4.0));

        assert!(row.contains(name));
        assert!(row.len() > BORDER.len());
    }

    #[test]
    fn test_render_table_with_rows() {
        let rows = vec![
            Product::new(1, "Widget", 5, 1.0),
            Product::new(2, "Gadget", 12, 19.99),
        ];
        let text = render_table("Current Inventory", &rows);
        let lines = lines(&text);

        assert_eq!(lines[0], "--- Current Inventory ---");
        assert_eq!(lines[1], BORDER);
        assert_eq!(lines[2], HEADER);
        assert_eq!(lines[3], BORDER);
        assert!(lines[4].starts_with("| 1    | Widget"));
        assert!(lines[5].ends_with("$    19.99 |"));
        assert_eq!(lines[6], BORDER);
        assert_eq!(lines.len(), 7);
        assert!(!text.contains(NO_RECORDS));
    }

    #[test]
    fn test_render_empty_table() {
        let text = render_table("Current Inventory", &[]);
        let lines = lines(&text);

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3], BORDER);
        assert_eq!(lines[4], BORDER);
        assert_eq!(lines[5], NO_RECORDS);
    }

    #[test]
    fn test_render_listing_custom_notice() {
        let text = render_listing(
            "Search Results for \"zzz\"",
            &Listing::Empty,
            "No products found matching \"zzz\".",
        );
        assert!(text.starts_with("--- Search Results for \"zzz\" ---\n"));
        assert!(text.ends_with("No products found matching \"zzz\".\n"));

        let listing = Listing::Rows(vec![Product::new(1, "Widget", 5, 1.0)]);
        let text = render_listing("Search Results", &listing, "unused");
        assert!(!text.contains("unused"));
    }

    #[test]
    fn test_render_summary() {
        let summary = InventorySummary {
            total_products: 3,
            total_value: 1234.5,
        };
        let text = render_summary(&summary);

        assert!(text.contains("Total unique products: 3\n"));
        assert!(text.contains("Total inventory value: $1234.50\n"));
    }

    #[test]
    fn test_render_empty_summary() {
        let text = render_summary(&InventorySummary::default());
        assert!(text.contains("Total unique products: 0\n"));
        assert!(text.contains("Total inventory value: $0.00\n"));
    }
}
