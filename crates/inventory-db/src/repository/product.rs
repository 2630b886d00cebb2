//! # Product Repository
//!
//! Database operations for inventory records.
//!
//! ## Key Operations
//! - Create / update / delete with affected-row outcomes
//! - Lazy scans (view all, search) and the low-stock filter
//! - The count and total-value report
//!
//! ## Parameter Binding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Search Reaches SQLite                          │
//! │                                                                         │
//! │  Operator types: "WID"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  like_pattern("WID") → "%WID%"   (%, _ and \ escaped first)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... WHERE LOWER(name) LIKE LOWER(?1) ESCAPE '\'                │
//! │                                      ▲                                  │
//! │                                      └── bound, never spliced in       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ products                                │                           │
//! │  │  1 | Widget        |  5 | 1.00          │ ← MATCH                   │
//! │  │  2 | Gadget        | 12 | 19.99         │                           │
//! │  │  3 | Mini widget   |  3 | 0.50          │ ← MATCH                   │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Listing::Rows([1, 3])   or   Listing::Empty                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Statements are prepared and cached by sqlx and reset or finalized when
//! their handle drops, so every exit path (early `?`, a stream dropped
//! half-way) releases them.

use inventory_core::{InventorySummary, Listing, NewProduct, Product, WriteOutcome};
use sqlx::SqlitePool;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, error, warn};

use crate::error::{DbError, DbResult};

const SELECT_ALL: &str = "SELECT id, name, quantity, price FROM products";

const SELECT_BY_ID: &str = "SELECT id, name, quantity, price FROM products WHERE id = ?1";

const SELECT_BY_NAME: &str = r"SELECT id, name, quantity, price FROM products
    WHERE LOWER(name) LIKE LOWER(?1) ESCAPE '\'";

const SELECT_BELOW_QUANTITY: &str = "SELECT id, name, quantity, price FROM products
    WHERE quantity < ?1
    ORDER BY quantity, id";

const INSERT: &str = "INSERT INTO products (name, quantity, price) VALUES (?1, ?2, ?3)";

const UPDATE: &str = "UPDATE products SET name = ?2, quantity = ?3, price = ?4 WHERE id = ?1";

const DELETE: &str = "DELETE FROM products WHERE id = ?1";

// SUM over zero rows is NULL; COALESCE turns it into 0.0 and CAST keeps
// the column REAL so it decodes as f64.
const SUMMARY: &str = "SELECT COUNT(*), CAST(COALESCE(SUM(quantity * price), 0.0) AS REAL)
    FROM products";

/// Repository for product database operations.
///
/// Borrows the open [`Database`](crate::Database); obtain one with
/// `db.products()`.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let widget = repo.create(&NewProduct::new("Widget", 5, 1.0)).await?;
/// match repo.delete(widget.id).await? {
///     WriteOutcome::Applied => println!("gone"),
///     WriteOutcome::NotFound { id } => println!("no product {id}"),
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Creates a new ProductRepository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored record with its store-assigned id
    /// * `Err(DbError::Invalid)` - The record breaks an invariant, nothing written
    /// * `Err(DbError::ExecFailed)` - The store rejected the insert
    pub async fn create(&self, product: &NewProduct) -> DbResult<Product> {
        check(product)?;

        debug!(
            name = %product.name,
            quantity = product.quantity,
            price = product.price,
            "Inserting product"
        );

        let result = sqlx::query(INSERT)
            .bind(product.name.as_str())
            .bind(product.quantity)
            .bind(product.price)
            .execute(self.pool)
            .await
            .map_err(|e| store_error("insert", e))?;

        let id = result.last_insert_rowid();
        debug!(id, "Product inserted");

        Ok(product.clone().with_id(id))
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No product has this id
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        sqlx::query_as::<_, Product>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| store_error("select by id", e))
    }

    /// Streams every product in the store's natural scan order.
    ///
    /// Rows are pulled from SQLite as the stream is polled. Each call
    /// starts a fresh scan. Insertion order is not promised once rows
    /// have been deleted.
    pub fn stream_all(&self) -> impl Stream<Item = DbResult<Product>> + Send + 'a {
        debug!("Scanning all products");

        sqlx::query_as::<_, Product>(SELECT_ALL)
            .fetch(self.pool)
            .map(|row| row.map_err(|e| store_error("select all", e)))
    }

    /// Collects [`stream_all`](Self::stream_all).
    pub async fn list_all(&self) -> DbResult<Listing> {
        let listing = Listing::from_rows(collect(self.stream_all()).await?);
        debug!(count = listing.len(), "Listed products");
        Ok(listing)
    }

    /// Streams products whose name contains `term`, ignoring case.
    ///
    /// `%`, `_` and `\` in `term` match themselves. An empty term matches
    /// every product. Case folding covers ASCII letters only: SQLite's
    /// `LOWER` leaves `Ä` and `ä` distinct.
    pub fn stream_by_name(&self, term: &str) -> impl Stream<Item = DbResult<Product>> + Send + 'a {
        let pattern = like_pattern(term);
        debug!(pattern = %pattern, "Searching products by name");

        sqlx::query_as::<_, Product>(SELECT_BY_NAME)
            .bind(pattern)
            .fetch(self.pool)
            .map(|row| row.map_err(|e| store_error("search", e)))
    }

    /// Case-insensitive (ASCII) substring search on the name.
    ///
    /// ## Returns
    /// * `Ok(Listing::Rows(..))` - Matches, in the store's default order
    /// * `Ok(Listing::Empty)` - The search ran and matched nothing
    /// * `Err(..)` - The search itself failed
    pub async fn search_by_name(&self, term: &str) -> DbResult<Listing> {
        let listing = Listing::from_rows(collect(self.stream_by_name(term)).await?);
        debug!(term = %term, empty = listing.is_empty(), "Search finished");
        Ok(listing)
    }

    /// Products with `quantity < threshold`, lowest quantity first.
    ///
    /// Ties keep the store's natural (id) order.
    pub async fn filter_by_quantity(&self, threshold: i64) -> DbResult<Listing> {
        debug!(threshold, "Filtering products by quantity");

        let rows = collect(
            sqlx::query_as::<_, Product>(SELECT_BELOW_QUANTITY)
                .bind(threshold)
                .fetch(self.pool)
                .map(|row| row.map_err(|e| store_error("filter", e))),
        )
        .await?;

        let listing = Listing::from_rows(rows);
        debug!(count = listing.len(), "Filter returned products");
        Ok(listing)
    }

    /// Replaces name, quantity and price of the product with `id`.
    ///
    /// ## Returns
    /// * `Ok(WriteOutcome::Applied)` - The row was rewritten
    /// * `Ok(WriteOutcome::NotFound)` - The statement ran but no row has this id
    /// * `Err(DbError::Invalid)` - The new values break an invariant
    pub async fn update(&self, id: i64, product: &NewProduct) -> DbResult<WriteOutcome> {
        check(product)?;

        debug!(id, name = %product.name, "Updating product");

        let result = sqlx::query(UPDATE)
            .bind(id)
            .bind(product.name.as_str())
            .bind(product.quantity)
            .bind(product.price)
            .execute(self.pool)
            .await
            .map_err(|e| store_error("update", e))?;

        Ok(outcome(id, result.rows_affected(), "update"))
    }

    /// Deletes the product with `id`. Physical and irreversible.
    ///
    /// ## Returns
    /// * `Ok(WriteOutcome::Applied)` - The row is gone
    /// * `Ok(WriteOutcome::NotFound)` - No row has this id
    pub async fn delete(&self, id: i64) -> DbResult<WriteOutcome> {
        debug!(id, "Deleting product");

        let result = sqlx::query(DELETE)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| store_error("delete", e))?;

        Ok(outcome(id, result.rows_affected(), "delete"))
    }

    /// Number of products and total stock value.
    ///
    /// An empty table yields `(0, 0.0)`.
    pub async fn summary(&self) -> DbResult<InventorySummary> {
        let (total_products, total_value): (i64, f64) = sqlx::query_as(SUMMARY)
            .fetch_one(self.pool)
            .await
            .map_err(|e| store_error("report", e))?;

        debug!(total_products, total_value, "Computed inventory summary");

        Ok(InventorySummary {
            total_products,
            total_value,
        })
    }

    /// Counts products (seed tool, diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await
            .map_err(|e| store_error("count", e))
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Validates a record before it reaches the store.
fn check(product: &NewProduct) -> DbResult<()> {
    product.validate().map_err(|e| {
        warn!(field = e.field(), error = %e, "Rejected invalid product");
        DbError::Invalid(e)
    })
}

/// Classifies and logs a store failure.
fn store_error(operation: &'static str, err: sqlx::Error) -> DbError {
    let err = DbError::classify(operation, err);
    error!(operation, error = %err, "Store operation failed");
    err
}

/// Turns an affected-row count into an outcome.
fn outcome(id: i64, rows_affected: u64, operation: &'static str) -> WriteOutcome {
    if rows_affected == 0 {
        warn!(id, operation, "No product with this id");
        WriteOutcome::NotFound { id }
    } else {
        WriteOutcome::Applied
    }
}

/// Drains a row stream, stopping at the first error.
async fn collect<S>(rows: S) -> DbResult<Vec<Product>>
where
    S: Stream<Item = DbResult<Product>>,
{
    rows.collect::<DbResult<Vec<Product>>>().await
}

/// Builds a `%term%` LIKE pattern with the wildcards in `term` escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn setup() -> Database {
        Database::open(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed(db: &Database, items: &[(&str, i64, f64)]) -> Vec<Product> {
        let mut created = Vec::new();
        for (name, quantity, price) in items {
            let product = NewProduct::new(*name, *quantity, *price);
            created.push(db.products().create(&product).await.unwrap());
        }
        created
    }

    fn quantities(listing: &Listing) -> Vec<i64> {
        listing.rows().iter().map(|p| p.quantity).collect()
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern("wid"), "%wid%");
        assert_eq!(like_pattern("100%"), r"%100\%%");
        assert_eq!(like_pattern("a_b"), r"%a\_b%");
        assert_eq!(like_pattern(r"c:\x"), r"%c:\\x%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let db = setup().await;

        let created = db
            .products()
            .create(&NewProduct::new("Widget", 5, 1.25))
            .await
            .unwrap();
        assert!(created.id > 0);

        let listing = db.products().list_all().await.unwrap();
        let matching: Vec<&Product> = listing
            .rows()
            .iter()
            .filter(|p| p.name == "Widget" && p.quantity == 5 && p.price == 1.25)
            .collect();

        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, created.id);
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let db = setup().await;
        assert_eq!(db.products().list_all().await.unwrap(), Listing::Empty);
    }

    #[tokio::test]
    async fn test_stream_all_is_lazy_and_restartable() {
        let db = setup().await;
        seed(&db, &[("A", 1, 1.0), ("B", 2, 2.0), ("C", 3, 3.0)]).await;

        let repo = db.products();

        let mut stream = Box::pin(repo.stream_all());
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.name, "A");
        drop(stream);

        let names: Vec<String> = repo
            .stream_all()
            .map(|row| row.unwrap().name)
            .collect()
            .await;
        assert_eq!(names, vec!["A", "B", "C"]);

        let again = repo.list_all().await.unwrap();
        assert_eq!(again.len(), 3);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let db = setup().await;
        let created = seed(&db, &[("Widget", 5, 1.0)]).await;

        let found = db.products().find_by_id(created[0].id).await.unwrap();
        assert_eq!(found, Some(created[0].clone()));

        assert_eq!(db.products().find_by_id(999_999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_product() {
        let db = setup().await;

        let err = db
            .products()
            .create(&NewProduct::new("   ", 5, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));

        let err = db
            .products()
            .create(&NewProduct::new("Widget", -1, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));

        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let db = setup().await;
        let created = seed(&db, &[("A", 1, 1.0), ("B", 1, 1.0)]).await;

        let outcome = db.products().delete(created[1].id).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Applied);

        let next = seed(&db, &[("C", 1, 1.0)]).await;
        assert!(next[0].id > created[1].id);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let db = setup().await;
        let created = seed(&db, &[("Widget", 5, 1.0)]).await;
        let id = created[0].id;

        let outcome = db
            .products()
            .update(id, &NewProduct::new("Widget Pro", 9, 2.5))
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Applied);

        let stored = db.products().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored, Product::new(id, "Widget Pro", 9, 2.5));
    }

    #[tokio::test]
    async fn test_update_with_same_values_keeps_summary() {
        let db = setup().await;
        let created = seed(&db, &[("Widget", 5, 1.0), ("Gadget", 2, 3.5)]).await;

        let before = db.products().summary().await.unwrap();
        let outcome = db
            .products()
            .update(created[0].id, &NewProduct::new("Widget", 5, 1.0))
            .await
            .unwrap();
        let after = db.products().summary().await.unwrap();

        assert_eq!(outcome, WriteOutcome::Applied);
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id_are_not_found() {
        let db = setup().await;
        seed(&db, &[("Widget", 5, 1.0)]).await;

        let outcome = db
            .products()
            .update(999_999, &NewProduct::new("Ghost", 1, 1.0))
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::NotFound { id: 999_999 });

        let outcome = db.products().delete(999_999).await.unwrap();
        assert_eq!(outcome, WriteOutcome::NotFound { id: 999_999 });

        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_values() {
        let db = setup().await;
        let created = seed(&db, &[("Widget", 5, 1.0)]).await;

        let err = db
            .products()
            .update(created[0].id, &NewProduct::new("Widget", 5, -2.0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));

        let stored = db.products().find_by_id(created[0].id).await.unwrap().unwrap();
        assert_eq!(stored.price, 1.0);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let db = setup().await;
        let created = seed(&db, &[("Widget", 5, 1.0), ("Gadget", 1, 1.0)]).await;

        let outcome = db.products().delete(created[0].id).await.unwrap();
        assert!(outcome.is_applied());

        let listing = db.products().list_all().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.rows()[0].name, "Gadget");

        // Second delete of the same id finds nothing.
        let outcome = db.products().delete(created[0].id).await.unwrap();
        assert_eq!(outcome, WriteOutcome::NotFound { id: created[0].id });
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let db = setup().await;
        let created = seed(&db, &[("Widget", 5, 1.0), ("Gadget", 2, 3.0)]).await;

        for term in ["widget", "WID", "wIdGeT"] {
            let listing = db.products().search_by_name(term).await.unwrap();
            assert_eq!(listing.len(), 1, "term {term}");
            assert_eq!(listing.rows()[0], created[0]);
        }
    }

    #[tokio::test]
    async fn test_search_substring_matches() {
        let db = setup().await;
        seed(
            &db,
            &[("Widget", 5, 1.0), ("Gadget", 2, 3.0), ("Mini widget", 3, 0.5)],
        )
        .await;

        let listing = db.products().search_by_name("widget").await.unwrap();
        let names: Vec<&str> = listing.rows().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Widget", "Mini widget"]);
    }

    #[tokio::test]
    async fn test_search_folds_ascii_case_only() {
        let db = setup().await;
        seed(&db, &[("ÄPFEL Juice", 4, 2.0)]).await;

        // ASCII letters fold, so the non-ASCII prefix must match exactly
        let listing = db.products().search_by_name("Äpfel juice").await.unwrap();
        assert_eq!(listing.len(), 1);

        let listing = db.products().search_by_name("äpfel").await.unwrap();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty_not_error() {
        let db = setup().await;
        seed(&db, &[("Widget", 5, 1.0)]).await;

        let listing = db.products().search_by_name("zzzz-nomatch").await.unwrap();
        assert_eq!(listing, Listing::Empty);
    }

    #[tokio::test]
    async fn test_search_wildcards_match_literally() {
        let db = setup().await;
        seed(
            &db,
            &[("100% Cotton", 4, 9.0), ("Cotton", 2, 5.0), ("a_b", 1, 1.0), ("axb", 1, 1.0)],
        )
        .await;

        let listing = db.products().search_by_name("%").await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.rows()[0].name, "100% Cotton");

        let listing = db.products().search_by_name("_").await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.rows()[0].name, "a_b");
    }

    #[tokio::test]
    async fn test_search_binds_hostile_input() {
        let db = setup().await;
        seed(&db, &[("Widget", 5, 1.0)]).await;

        let listing = db
            .products()
            .search_by_name("'; DROP TABLE products; --")
            .await
            .unwrap();
        assert!(listing.is_empty());
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_filter_orders_by_quantity() {
        let db = setup().await;
        seed(&db, &[("Ten", 10, 1.0), ("Two", 2, 1.0), ("Seven", 7, 1.0)]).await;

        let listing = db.products().filter_by_quantity(8).await.unwrap();
        assert_eq!(quantities(&listing), vec![2, 7]);
    }

    #[tokio::test]
    async fn test_filter_ties_keep_natural_order() {
        let db = setup().await;
        let created = seed(&db, &[("First", 3, 1.0), ("Low", 1, 1.0), ("Second", 3, 1.0)]).await;

        let listing = db.products().filter_by_quantity(5).await.unwrap();
        let ids: Vec<i64> = listing.rows().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![created[1].id, created[0].id, created[2].id]);
    }

    #[tokio::test]
    async fn test_filter_threshold_is_exclusive() {
        let db = setup().await;
        seed(&db, &[("Eight", 8, 1.0), ("Zero", 0, 1.0)]).await;

        let listing = db.products().filter_by_quantity(8).await.unwrap();
        assert_eq!(quantities(&listing), vec![0]);

        let listing = db.products().filter_by_quantity(0).await.unwrap();
        assert_eq!(listing, Listing::Empty);
    }

    #[tokio::test]
    async fn test_summary_on_empty_table() {
        let db = setup().await;

        let summary = db.products().summary().await.unwrap();
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.total_value, 0.0);
    }

    #[tokio::test]
    async fn test_summary_totals() {
        let db = setup().await;
        let items = [("A", 3, 1.5), ("B", 2, 2.25), ("C", 0, 100.0), ("D", 7, 0.1)];
        seed(&db, &items).await;

        let expected: f64 = items.iter().map(|(_, q, p)| *q as f64 * p).sum();
        let summary = db.products().summary().await.unwrap();

        assert_eq!(summary.total_products, 4);
        assert!((summary.total_value - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_missing_table_is_prepare_failure_not_empty() {
        let db = setup().await;
        sqlx::query("DROP TABLE products")
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.products().list_all().await.unwrap_err();
        assert!(matches!(err, DbError::PrepareFailed { .. }), "got {err:?}");

        let err = db.products().search_by_name("x").await.unwrap_err();
        assert!(matches!(err, DbError::PrepareFailed { .. }), "got {err:?}");

        let err = db.products().summary().await.unwrap_err();
        assert!(matches!(err, DbError::PrepareFailed { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_rejected_insert_is_exec_failure() {
        let db = setup().await;
        sqlx::query(
            "CREATE TRIGGER no_inserts BEFORE INSERT ON products
             BEGIN SELECT RAISE(ABORT, 'inserts disabled'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db
            .products()
            .create(&NewProduct::new("Widget", 5, 1.0))
            .await
            .unwrap_err();

        match err {
            DbError::ExecFailed { operation, message } => {
                assert_eq!(operation, "insert");
                assert!(message.contains("inserts disabled"));
            }
            other => panic!("expected ExecFailed, got {other:?}"),
        }
    }
}
