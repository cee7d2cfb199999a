use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};

use stockroom_catalog::{
    Category, Inventory, NewCategory, NewInventory, NewProduct, NewSupplier, Product, Supplier,
    Validate,
};
use stockroom_core::{CategoryId, DomainError, InventoryId, ProductId, SupplierId};

use super::r#trait::{CatalogStore, StoreError, StoreResult};

/// In-memory catalog store for tests/dev.
///
/// Enforces the same rules the Postgres schema does: unique `sku`, existing
/// `category_id`/`supplier_id` on write, and `NO ACTION` on delete of a row
/// that is still referenced. Ids are assigned from per-table counters starting
/// at 1 and are never reused, like `SERIAL`.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    suppliers: BTreeMap<i32, Supplier>,
    products: BTreeMap<i32, Product>,
    inventory: BTreeMap<i32, Inventory>,
    next_category: i32,
    next_supplier: i32,
    next_product: i32,
    next_inventory: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Reject what the text columns would: NUL characters and over-long values.
fn check_columns<T: Validate>(input: &T) -> StoreResult<()> {
    input.check_columns().map_err(|e| match e {
        DomainError::Validation(msg) => StoreError::Validation(msg),
        other => StoreError::Validation(other.to_string()),
    })
}

impl Tables {
    fn check_product_refs(&self, input: &NewProduct) -> StoreResult<()> {
        if let Some(c) = input.category_id {
            if !self.categories.contains_key(&c.get()) {
                return Err(StoreError::Constraint(format!(
                    "category_id {c} does not reference an existing category"
                )));
            }
        }
        if let Some(s) = input.supplier_id {
            if !self.suppliers.contains_key(&s.get()) {
                return Err(StoreError::Constraint(format!(
                    "supplier_id {s} does not reference an existing supplier"
                )));
            }
        }
        Ok(())
    }

    fn check_sku_free(&self, sku: &str, except: Option<ProductId>) -> StoreResult<()> {
        let taken = self
            .products
            .values()
            .any(|p| p.sku == sku && Some(p.id) != except);
        if taken {
            return Err(StoreError::Constraint(format!("duplicate sku {sku}")));
        }
        Ok(())
    }
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Database("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Database("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    async fn create_category(&self, input: NewCategory) -> StoreResult<Category> {
        check_columns(&input)?;
        let mut t = self.write()?;
        let id = next_id(&mut t.next_category);
        let record = input.into_record(CategoryId::new(id));
        t.categories.insert(id, record.clone());
        Ok(record)
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.read()?.categories.get(&id.get()).cloned())
    }

    async fn update_category(&self, id: CategoryId, input: NewCategory) -> StoreResult<()> {
        check_columns(&input)?;
        let mut t = self.write()?;
        if let Some(row) = t.categories.get_mut(&id.get()) {
            *row = input.into_record(id);
        }
        Ok(())
    }

    async fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let mut t = self.write()?;
        if t.products.values().any(|p| p.category_id == Some(id)) {
            return Err(StoreError::Constraint(format!(
                "category {id} is still referenced by products"
            )));
        }
        t.categories.remove(&id.get());
        Ok(())
    }

    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        Ok(self.read()?.suppliers.values().cloned().collect())
    }

    async fn create_supplier(&self, input: NewSupplier) -> StoreResult<Supplier> {
        check_columns(&input)?;
        let mut t = self.write()?;
        let id = next_id(&mut t.next_supplier);
        let record = input.into_record(SupplierId::new(id));
        t.suppliers.insert(id, record.clone());
        Ok(record)
    }

    async fn get_supplier(&self, id: SupplierId) -> StoreResult<Option<Supplier>> {
        Ok(self.read()?.suppliers.get(&id.get()).cloned())
    }

    async fn update_supplier(&self, id: SupplierId, input: NewSupplier) -> StoreResult<()> {
        check_columns(&input)?;
        let mut t = self.write()?;
        if let Some(row) = t.suppliers.get_mut(&id.get()) {
            *row = input.into_record(id);
        }
        Ok(())
    }

    async fn delete_supplier(&self, id: SupplierId) -> StoreResult<()> {
        let mut t = self.write()?;
        if t.products.values().any(|p| p.supplier_id == Some(id)) {
            return Err(StoreError::Constraint(format!(
                "supplier {id} is still referenced by products"
            )));
        }
        t.suppliers.remove(&id.get());
        Ok(())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.read()?.products.values().cloned().collect())
    }

    async fn create_product(&self, input: NewProduct) -> StoreResult<Product> {
        check_columns(&input)?;
        let mut t = self.write()?;
        t.check_sku_free(&input.sku, None)?;
        t.check_product_refs(&input)?;

        let id = next_id(&mut t.next_product);
        // Postgres keeps microseconds; match it so records compare equal across backends.
        let created_at = Utc::now().trunc_subsecs(6);
        let record = input.into_record(ProductId::new(id), created_at);
        t.products.insert(id, record.clone());
        Ok(record)
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.read()?.products.get(&id.get()).cloned())
    }

    async fn update_product(&self, id: ProductId, input: NewProduct) -> StoreResult<()> {
        check_columns(&input)?;
        let mut t = self.write()?;
        let Some(created_at) = t.products.get(&id.get()).map(|p| p.created_at) else {
            return Ok(());
        };
        t.check_sku_free(&input.sku, Some(id))?;
        t.check_product_refs(&input)?;
        t.products.insert(id.get(), input.into_record(id, created_at));
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let mut t = self.write()?;
        if t.inventory.values().any(|i| i.product_id == id) {
            return Err(StoreError::Constraint(format!(
                "product {id} is still referenced by inventory"
            )));
        }
        t.products.remove(&id.get());
        Ok(())
    }

    async fn create_inventory(&self, input: NewInventory) -> StoreResult<Inventory> {
        let mut t = self.write()?;
        if !t.products.contains_key(&input.product_id.get()) {
            return Err(StoreError::Constraint(format!(
                "product_id {} does not reference an existing product",
                input.product_id
            )));
        }
        let id = next_id(&mut t.next_inventory);
        let record = input.into_record(InventoryId::new(id));
        t.inventory.insert(id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let store = InMemoryCatalogStore::new();
        let a = store.create_category(NewCategory::new("Laptops")).await.unwrap();
        let b = store.create_category(NewCategory::new("Audio")).await.unwrap();
        assert_eq!(a.id.get(), 1);
        assert_eq!(b.id.get(), 2);

        store.delete_category(b.id).await.unwrap();
        let c = store.create_category(NewCategory::new("Phones")).await.unwrap();
        assert_eq!(c.id.get(), 3);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = InMemoryCatalogStore::new();
        for name in ["c", "a", "b"] {
            store.create_supplier(NewSupplier::new(name)).await.unwrap();
        }
        let names: Vec<_> = store
            .list_suppliers()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn duplicate_sku_is_a_constraint_violation() {
        let store = InMemoryCatalogStore::new();
        store.create_product(NewProduct::new("X-1", "Widget")).await.unwrap();
        let err = store
            .create_product(NewProduct::new("X-1", "Other"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.list_products().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected_without_insert() {
        let store = InMemoryCatalogStore::new();
        let err = store
            .create_product(NewProduct::new("X-1", "Widget").in_category(CategoryId::new(9999)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert!(store.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_overwrites_optionals_and_keeps_created_at() {
        let store = InMemoryCatalogStore::new();
        let cat = store.create_category(NewCategory::new("Laptops")).await.unwrap();
        let created = store
            .create_product(
                NewProduct::new("X-1", "Widget")
                    .with_description("shiny")
                    .with_price_cents(500)
                    .in_category(cat.id),
            )
            .await
            .unwrap();

        let replaced = store
            .replace_product(created.id, NewProduct::new("X-1", "Widget 2"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.name, "Widget 2");
        assert_eq!(replaced.description, None);
        assert_eq!(replaced.price_cents, 0);
        assert_eq!(replaced.category_id, None);
        assert_eq!(replaced.created_at, created.created_at);
    }

    #[tokio::test]
    async fn column_rules_match_postgres() {
        let store = InMemoryCatalogStore::new();
        let err = store
            .create_category(NewCategory::new("Lap\u{0}tops"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = store
            .create_product(NewProduct::new("S".repeat(65), "Long sku"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = store
            .create_product(NewProduct::new("X-1", "Widget").with_description("a\0b"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.list_categories().await.unwrap().is_empty());
        assert!(store.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_of_missing_row_is_none() {
        let store = InMemoryCatalogStore::new();
        let res = store
            .replace_category(CategoryId::new(42), NewCategory::new("Ghost"))
            .await
            .unwrap();
        assert_eq!(res, None);
        assert!(store.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_may_keep_own_sku_but_not_take_another() {
        let store = InMemoryCatalogStore::new();
        let a = store.create_product(NewProduct::new("A", "a")).await.unwrap();
        store.create_product(NewProduct::new("B", "b")).await.unwrap();

        assert!(store.replace_product(a.id, NewProduct::new("A", "a2")).await.is_ok());
        let err = store
            .replace_product(a.id, NewProduct::new("B", "a3"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent_but_respects_references() {
        let store = InMemoryCatalogStore::new();
        let sup = store.create_supplier(NewSupplier::new("Acme")).await.unwrap();
        let p = store
            .create_product(NewProduct::new("X-1", "Widget").from_supplier(sup.id))
            .await
            .unwrap();

        assert!(matches!(
            store.delete_supplier(sup.id).await,
            Err(StoreError::Constraint(_))
        ));

        store.delete_product(p.id).await.unwrap();
        store.delete_product(p.id).await.unwrap();
        store.delete_supplier(sup.id).await.unwrap();
        store.delete_supplier(sup.id).await.unwrap();
        assert!(store.get_supplier(sup.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inventory_requires_existing_product() {
        let store = InMemoryCatalogStore::new();
        let err = store
            .create_inventory(NewInventory::new(ProductId::new(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));

        let p = store.create_product(NewProduct::new("X-1", "Widget")).await.unwrap();
        let inv = store
            .create_inventory(NewInventory::new(p.id).with_quantity(3))
            .await
            .unwrap();
        assert_eq!(inv.quantity, 3);
        assert!(matches!(
            store.delete_product(p.id).await,
            Err(StoreError::Constraint(_))
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn block_on<F: std::future::Future>(f: F) -> F::Output {
            tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap()
                .block_on(f)
        }

        proptest! {
            /// Property: a created product reads back identical, with a fresh id.
            #[test]
            fn create_then_get_is_identical(
                skus in proptest::collection::hash_set("[A-Z]{2}-[0-9]{1,4}", 1..8),
                price in 0i32..1_000_000,
            ) {
                block_on(async {
                    let store = InMemoryCatalogStore::new();
                    let mut seen = std::collections::HashSet::new();
                    for sku in &skus {
                        let input = NewProduct::new(sku.clone(), "Widget").with_price_cents(price);
                        let created = store.create_product(input.clone()).await.unwrap();
                        prop_assert!(seen.insert(created.id));
                        prop_assert_eq!(&created.sku, &input.sku);
                        prop_assert_eq!(created.price_cents, input.price_cents);

                        let fetched = store.get_product(created.id).await.unwrap();
                        prop_assert_eq!(fetched, Some(created));
                    }
                    Ok(())
                })?;
            }
        }
    }
}
