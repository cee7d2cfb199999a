//! Catalog DDL.
//!
//! Applied statement by statement at startup. Every statement is idempotent so
//! re-running against an existing database is a no-op. Order matters: tables
//! are created after the tables they reference.
//!
//! Column types match databases created by earlier deployments; an existing
//! table is never altered, so a type drift here would only surface as decode
//! errors at request time.

/// `(table, statement)` pairs in dependency order.
pub const STATEMENTS: &[(&str, &str)] = &[
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id   SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL
        )
        "#,
    ),
    (
        "suppliers",
        r#"
        CREATE TABLE IF NOT EXISTS suppliers (
            id            SERIAL PRIMARY KEY,
            name          VARCHAR(255) NOT NULL,
            contact_email VARCHAR(255),
            phone         VARCHAR(64)
        )
        "#,
    ),
    (
        "products",
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id          SERIAL PRIMARY KEY,
            sku         VARCHAR(64) NOT NULL UNIQUE,
            name        VARCHAR(255) NOT NULL,
            description TEXT,
            price_cents INTEGER NOT NULL DEFAULT 0,
            category_id INTEGER REFERENCES categories (id),
            supplier_id INTEGER REFERENCES suppliers (id),
            created_at  TIMESTAMP NOT NULL DEFAULT (NOW() AT TIME ZONE 'utc')
        )
        "#,
    ),
    (
        "inventory",
        r#"
        CREATE TABLE IF NOT EXISTS inventory (
            id                SERIAL PRIMARY KEY,
            product_id        INTEGER NOT NULL REFERENCES products (id),
            quantity          INTEGER NOT NULL DEFAULT 0,
            restock_threshold INTEGER NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id          SERIAL PRIMARY KEY,
            created_at  TIMESTAMP NOT NULL DEFAULT (NOW() AT TIME ZONE 'utc'),
            total_cents INTEGER NOT NULL DEFAULT 0,
            status      VARCHAR(50) NOT NULL DEFAULT 'pending'
        )
        "#,
    ),
    (
        "order_items",
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            id               SERIAL PRIMARY KEY,
            order_id         INTEGER NOT NULL REFERENCES orders (id),
            product_id       INTEGER NOT NULL REFERENCES products (id),
            quantity         INTEGER NOT NULL DEFAULT 1,
            unit_price_cents INTEGER NOT NULL DEFAULT 0
        )
        "#,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referenced_tables_are_created_first() {
        let position = |name: &str| STATEMENTS.iter().position(|(t, _)| *t == name).unwrap();
        for (table, ddl) in STATEMENTS {
            for referenced in ["categories", "suppliers", "products", "orders"] {
                if ddl.contains(&format!("REFERENCES {referenced} ")) {
                    assert!(
                        position(referenced) < position(*table),
                        "{table} references {referenced} before it exists"
                    );
                }
            }
        }
    }

    #[test]
    fn created_at_columns_have_no_time_zone() {
        for (table, ddl) in STATEMENTS {
            assert!(!ddl.contains("TIMESTAMPTZ"), "{table} uses TIMESTAMPTZ");
            if ddl.contains("created_at") {
                assert!(ddl.contains("created_at  TIMESTAMP NOT NULL"), "{table}");
            }
        }
    }

    #[test]
    fn order_status_default_matches_catalog() {
        let (_, ddl) = STATEMENTS.iter().find(|(t, _)| *t == "orders").unwrap();
        let expected = format!("DEFAULT '{}'", stockroom_catalog::DEFAULT_ORDER_STATUS);
        assert!(ddl.contains(&expected));
    }
}
