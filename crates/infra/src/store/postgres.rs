//! Postgres-backed catalog store.
//!
//! Every operation is a single parameterized statement against the pool; the
//! engine enforces `sku` uniqueness and the foreign keys, and this module only
//! translates its verdicts.
//!
//! `created_at` columns are `TIMESTAMP` (no time zone) holding UTC wall-clock
//! time, which is also what databases created by earlier deployments contain.
//! Inserts bind the value explicitly instead of relying on the session zone.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database (unique violation) | `23505` | `Constraint` | Duplicate `sku` |
//! | Database (foreign key violation) | `23503` | `Constraint` | Unknown `category_id`/`supplier_id`, or deleting a referenced row |
//! | Database (string data right truncation) | `22001` | `Validation` | Value longer than its `VARCHAR(n)` |
//! | Database (character not in repertoire) | `22021` | `Validation` | NUL character in text |
//! | Database (not null violation) | `23502` | `Validation` | Required column missing |
//! | Database (other) | Any other | `Database` | |
//! | PoolClosed / Io / other | N/A | `Database` | Connectivity failures |
//!
//! Constraint and validation errors carry a fixed message per SQLSTATE; the
//! server's own message (constraint names, offending values) is only logged.

use chrono::{NaiveDateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use stockroom_catalog::{
    Category, Inventory, NewCategory, NewInventory, NewProduct, NewSupplier, Product, Supplier,
};
use stockroom_core::{CategoryId, InventoryId, ProductId, SupplierId};

use super::r#trait::{CatalogStore, StoreError, StoreResult};
use crate::schema;

/// Postgres-backed catalog store.
///
/// `PgPool` is `Send + Sync` and cheap to clone; concurrent requests share it
/// without any locking on our side.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    #[instrument(skip(database_url), err)]
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }
}

#[async_trait::async_trait]
impl CatalogStore for PostgresCatalogStore {
    /// Create any missing catalog tables.
    #[instrument(skip(self), err)]
    async fn ensure_schema(&self) -> StoreResult<()> {
        for (table, ddl) in schema::STATEMENTS {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(table, e))?;
        }
        tracing::debug!(tables = schema::STATEMENTS.len(), "catalog schema ensured");
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_categories", e))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, input), err)]
    async fn create_category(&self, input: NewCategory) -> StoreResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&input.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_category", e))?;
        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_category", e))?;
        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, input), err)]
    async fn update_category(&self, id: CategoryId, input: NewCategory) -> StoreResult<()> {
        sqlx::query("UPDATE categories SET name = $2 WHERE id = $1")
            .bind(id.get())
            .bind(&input.name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update_category", e))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let res = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_category", e))?;
        tracing::debug!(rows = res.rows_affected(), "category delete");
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, contact_email, phone FROM suppliers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_suppliers", e))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, input), err)]
    async fn create_supplier(&self, input: NewSupplier) -> StoreResult<Supplier> {
        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            INSERT INTO suppliers (name, contact_email, phone)
            VALUES ($1, $2, $3)
            RETURNING id, name, contact_email, phone
            "#,
        )
        .bind(&input.name)
        .bind(input.contact_email.as_deref())
        .bind(input.phone.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_supplier", e))?;
        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn get_supplier(&self, id: SupplierId) -> StoreResult<Option<Supplier>> {
        let row = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, contact_email, phone FROM suppliers WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_supplier", e))?;
        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, input), err)]
    async fn update_supplier(&self, id: SupplierId, input: NewSupplier) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE suppliers
            SET name = $2, contact_email = $3, phone = $4
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&input.name)
        .bind(input.contact_email.as_deref())
        .bind(input.phone.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_supplier", e))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete_supplier(&self, id: SupplierId) -> StoreResult<()> {
        let res = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_supplier", e))?;
        tracing::debug!(rows = res.rows_affected(), "supplier delete");
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, sku, name, description, price_cents, category_id, supplier_id, created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_products", e))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, input), fields(sku = %input.sku), err)]
    async fn create_product(&self, input: NewProduct) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products
                (sku, name, description, price_cents, category_id, supplier_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, sku, name, description, price_cents, category_id, supplier_id, created_at
            "#,
        )
        .bind(&input.sku)
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.price_cents)
        .bind(input.category_id.map(|c| c.get()))
        .bind(input.supplier_id.map(|s| s.get()))
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_product", e))?;
        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, sku, name, description, price_cents, category_id, supplier_id, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_product", e))?;
        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, input), fields(sku = %input.sku), err)]
    async fn update_product(&self, id: ProductId, input: NewProduct) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE products
            SET sku = $2,
                name = $3,
                description = $4,
                price_cents = $5,
                category_id = $6,
                supplier_id = $7
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&input.sku)
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.price_cents)
        .bind(input.category_id.map(|c| c.get()))
        .bind(input.supplier_id.map(|s| s.get()))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_product", e))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let res = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;
        tracing::debug!(rows = res.rows_affected(), "product delete");
        Ok(())
    }

    #[instrument(skip(self, input), fields(product_id = %input.product_id), err)]
    async fn create_inventory(&self, input: NewInventory) -> StoreResult<Inventory> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            INSERT INTO inventory (product_id, quantity, restock_threshold)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, quantity, restock_threshold
            "#,
        )
        .bind(input.product_id.get())
        .bind(input.quantity)
        .bind(input.restock_threshold)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_inventory", e))?;
        Ok(row.into())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("postgres pool closed");
    }
}

/// How a SQLSTATE code is reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SqlState {
    Constraint(&'static str),
    Validation(&'static str),
    Other,
}

fn classify(code: Option<&str>) -> SqlState {
    match code {
        Some("23505") => SqlState::Constraint("a product with this sku already exists"),
        Some("23503") => SqlState::Constraint(
            "a referenced row does not exist, or this row is still referenced",
        ),
        Some("22001") => SqlState::Validation("a value is longer than its column allows"),
        Some("22021") => SqlState::Validation("text must not contain NUL characters"),
        Some("23502") => SqlState::Validation("a required value is missing"),
        _ => SqlState::Other,
    }
}

/// Map a SQLx error onto the store taxonomy (see the module table).
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code();
            let detail = match db_err.constraint() {
                Some(constraint) => format!("{} ({})", db_err.message(), constraint),
                None => db_err.message().to_string(),
            };

            match classify(code.as_deref()) {
                SqlState::Constraint(msg) => {
                    tracing::info!(operation, ?code, %detail, "write rejected by constraint");
                    StoreError::Constraint(msg.to_string())
                }
                SqlState::Validation(msg) => {
                    tracing::info!(operation, ?code, %detail, "value rejected by column");
                    StoreError::Validation(msg.to_string())
                }
                SqlState::Other => {
                    StoreError::Database(format!("database error in {}: {}", operation, detail))
                }
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Database(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Database(format!("sqlx error in {}: {}", operation, err)),
    }
}

// SQLx row types

#[derive(Debug)]
struct CategoryRow {
    id: i32,
    name: String,
}

impl<'r> FromRow<'r, PgRow> for CategoryRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(CategoryRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId::new(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug)]
struct SupplierRow {
    id: i32,
    name: String,
    contact_email: Option<String>,
    phone: Option<String>,
}

impl<'r> FromRow<'r, PgRow> for SupplierRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(SupplierRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            contact_email: row.try_get("contact_email")?,
            phone: row.try_get("phone")?,
        })
    }
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: SupplierId::new(row.id),
            name: row.name,
            contact_email: row.contact_email,
            phone: row.phone,
        }
    }
}

#[derive(Debug)]
struct ProductRow {
    id: i32,
    sku: String,
    name: String,
    description: Option<String>,
    price_cents: i32,
    category_id: Option<i32>,
    supplier_id: Option<i32>,
    created_at: NaiveDateTime,
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price_cents: row.try_get("price_cents")?,
            category_id: row.try_get("category_id")?,
            supplier_id: row.try_get("supplier_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            sku: row.sku,
            name: row.name,
            description: row.description,
            price_cents: row.price_cents,
            category_id: row.category_id.map(CategoryId::new),
            supplier_id: row.supplier_id.map(SupplierId::new),
            created_at: row.created_at.and_utc(),
        }
    }
}

#[derive(Debug)]
struct InventoryRow {
    id: i32,
    product_id: i32,
    quantity: i32,
    restock_threshold: i32,
}

impl<'r> FromRow<'r, PgRow> for InventoryRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(InventoryRow {
            id: row.try_get("id")?,
            product_id: row.try_get("product_id")?,
            quantity: row.try_get("quantity")?,
            restock_threshold: row.try_get("restock_threshold")?,
        })
    }
}

impl From<InventoryRow> for Inventory {
    fn from(row: InventoryRow) -> Self {
        Inventory {
            id: InventoryId::new(row.id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            restock_threshold: row.restock_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlstate_codes_are_classified() {
        for code in ["23505", "23503"] {
            assert!(
                matches!(classify(Some(code)), SqlState::Constraint(_)),
                "{code}"
            );
        }
        for code in ["22001", "22021", "23502"] {
            assert!(
                matches!(classify(Some(code)), SqlState::Validation(_)),
                "{code}"
            );
        }
        for code in [Some("40001"), Some("42P01"), Some("23514"), None] {
            assert_eq!(classify(code), SqlState::Other, "{code:?}");
        }
    }

    #[test]
    fn client_messages_do_not_name_constraints() {
        let SqlState::Constraint(msg) = classify(Some("23503")) else {
            panic!("foreign key violation should be a constraint error");
        };
        assert!(!msg.contains("fkey"));
        assert!(!msg.contains("products_"));
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(12, 30, 0, 123_456)
            .unwrap();
        let product: Product = ProductRow {
            id: 1,
            sku: "X-1".into(),
            name: "Widget".into(),
            description: None,
            price_cents: 0,
            category_id: None,
            supplier_id: None,
            created_at: naive,
        }
        .into();
        assert_eq!(product.created_at.to_rfc3339(), "2024-05-01T12:30:00.123456+00:00");
    }

    #[test]
    fn non_database_errors_map_to_database_variant() {
        let err = map_sqlx_error("get_product", sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(ref m) if m.contains("get_product")));

        let err = map_sqlx_error("list_products", sqlx::Error::PoolClosed);
        assert_eq!(
            err,
            StoreError::Database("connection pool closed in list_products".to_string())
        );
    }
}
