//! `PostgresCatalogStore` against a real server.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p stockroom-infra -- --ignored`.
//! Each test works in its own throwaway schema.

use std::sync::atomic::{AtomicU32, Ordering};

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use stockroom_catalog::{NewCategory, NewProduct};
use stockroom_core::CategoryId;
use stockroom_infra::{CatalogStore, PostgresCatalogStore, StoreError};

static NEXT_SCHEMA: AtomicU32 = AtomicU32::new(0);

/// Tables as an earlier deployment created them: plain `timestamp` columns,
/// named unique and foreign-key constraints.
const EXISTING_DDL: &[&str] = &[
    r#"CREATE TABLE categories (
        id serial PRIMARY KEY NOT NULL,
        name varchar(255) NOT NULL
    )"#,
    r#"CREATE TABLE suppliers (
        id serial PRIMARY KEY NOT NULL,
        name varchar(255) NOT NULL,
        contact_email varchar(255),
        phone varchar(64)
    )"#,
    r#"CREATE TABLE products (
        id serial PRIMARY KEY NOT NULL,
        sku varchar(64) NOT NULL,
        name varchar(255) NOT NULL,
        description text,
        price_cents integer DEFAULT 0 NOT NULL,
        category_id integer,
        supplier_id integer,
        created_at timestamp DEFAULT now() NOT NULL,
        CONSTRAINT products_sku_unique UNIQUE (sku),
        CONSTRAINT products_category_id_categories_id_fk
            FOREIGN KEY (category_id) REFERENCES categories (id),
        CONSTRAINT products_supplier_id_suppliers_id_fk
            FOREIGN KEY (supplier_id) REFERENCES suppliers (id)
    )"#,
];

struct TestDb {
    admin: PgPool,
    schema: String,
    store: PostgresCatalogStore,
}

impl TestDb {
    /// `None` when `DATABASE_URL` is not set.
    async fn connect() -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping");
            return None;
        };

        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .expect("failed to connect admin pool");
        let schema = format!(
            "stockroom_test_{}_{}",
            std::process::id(),
            NEXT_SCHEMA.fetch_add(1, Ordering::SeqCst)
        );
        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&admin)
            .await
            .expect("failed to create test schema");

        let options: PgConnectOptions = url.parse().expect("invalid DATABASE_URL");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_with(options.options([("search_path", schema.as_str())]))
            .await
            .expect("failed to connect store pool");

        Some(Self {
            admin,
            schema,
            store: PostgresCatalogStore::new(pool),
        })
    }

    async fn with_schema() -> Option<Self> {
        let db = Self::connect().await?;
        db.store.ensure_schema().await.expect("ensure_schema failed");
        Some(db)
    }

    async fn cleanup(self) {
        self.store.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("failed to drop test schema");
    }
}

#[tokio::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn works_against_tables_from_an_earlier_deployment() {
    let Some(db) = TestDb::connect().await else { return };
    for ddl in EXISTING_DDL {
        sqlx::raw_sql(&format!("SET search_path TO {}; {ddl}", db.schema))
            .execute(&db.admin)
            .await
            .expect("failed to create existing table");
    }
    db.store.ensure_schema().await.unwrap();

    let created = db.store.create_product(NewProduct::new("X-1", "Widget")).await.unwrap();
    let listed = db.store.list_products().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(db.store.get_product(created.id).await.unwrap(), Some(created));

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn duplicate_sku_is_a_constraint_violation() {
    let Some(db) = TestDb::with_schema().await else { return };

    db.store.create_product(NewProduct::new("X-1", "Widget")).await.unwrap();
    let err = db
        .store
        .create_product(NewProduct::new("X-1", "Other"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::Constraint("a product with this sku already exists".to_string())
    );

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn unknown_category_is_rejected_without_insert() {
    let Some(db) = TestDb::with_schema().await else { return };

    let err = db
        .store
        .create_product(NewProduct::new("X-1", "Widget").in_category(CategoryId::new(9999)))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Constraint(ref m) if !m.contains("fkey")));
    assert!(db.store.list_products().await.unwrap().is_empty());

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn replace_keeps_created_at_and_clears_optionals() {
    let Some(db) = TestDb::with_schema().await else { return };

    let created = db
        .store
        .create_product(NewProduct::new("X-1", "Widget").with_description("shiny"))
        .await
        .unwrap();
    let replaced = db
        .store
        .replace_product(created.id, NewProduct::new("X-1", "Widget 2"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.name, "Widget 2");
    assert_eq!(replaced.description, None);
    assert_eq!(replaced.created_at, created.created_at);

    let missing = db
        .store
        .replace_category(CategoryId::new(42), NewCategory::new("Ghost"))
        .await
        .unwrap();
    assert_eq!(missing, None);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn column_violations_are_validation_errors() {
    let Some(db) = TestDb::with_schema().await else { return };

    let err = db
        .store
        .create_product(NewProduct::new("S".repeat(65), "Long sku"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)), "{err:?}");

    let err = db
        .store
        .create_category(NewCategory::new("Lap\u{0}tops"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)), "{err:?}");

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn delete_is_idempotent_but_respects_references() {
    let Some(db) = TestDb::with_schema().await else { return };

    let cat = db.store.create_category(NewCategory::new("Audio")).await.unwrap();
    let product = db
        .store
        .create_product(NewProduct::new("EAR-2000", "Earbuds").in_category(cat.id))
        .await
        .unwrap();

    let err = db.store.delete_category(cat.id).await.unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)));

    db.store.delete_product(product.id).await.unwrap();
    db.store.delete_product(product.id).await.unwrap();
    db.store.delete_category(cat.id).await.unwrap();
    assert_eq!(db.store.get_category(cat.id).await.unwrap(), None);

    db.cleanup().await;
}
