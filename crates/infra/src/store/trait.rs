use async_trait::async_trait;
use thiserror::Error;

use stockroom_catalog::{
    Category, Inventory, NewCategory, NewInventory, NewProduct, NewSupplier, Product, Supplier,
};
use stockroom_core::{CategoryId, DomainError, ProductId, SupplierId};

/// Result type returned by every `CatalogStore` operation.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation error.
///
/// Absence of a row is not an error at this level: lookups return `Option`
/// and deletes succeed regardless. The variants below are what the backing
/// engine can reject.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Uniqueness or foreign-key rule rejected the write.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// A value was rejected by a column constraint (length, not-null).
    #[error("invalid value: {0}")]
    Validation(String),

    /// Connectivity, protocol, decoding, or any other backend failure.
    #[error("database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Domain view of this error, when it has one.
    ///
    /// `Database` failures have no domain meaning and return `None`; callers
    /// report those as internal errors.
    pub fn to_domain(&self) -> Option<DomainError> {
        match self {
            StoreError::Constraint(msg) => Some(DomainError::constraint(msg.clone())),
            StoreError::Validation(msg) => Some(DomainError::validation(msg.clone())),
            StoreError::Database(_) => None,
        }
    }
}

/// Data access for the catalog tables.
///
/// Every method is a single round trip to the backing store, except the
/// provided `replace_*` methods which write and then read back. That pair is
/// not atomic: a delete landing between the two yields `Ok(None)` even though
/// the write succeeded.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Categories

    /// All categories ordered by ascending id.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn create_category(&self, input: NewCategory) -> StoreResult<Category>;
    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>>;
    /// Overwrite every mutable column; a missing id is a silent no-op.
    async fn update_category(&self, id: CategoryId, input: NewCategory) -> StoreResult<()>;
    /// Remove the row if present.
    async fn delete_category(&self, id: CategoryId) -> StoreResult<()>;

    async fn replace_category(
        &self,
        id: CategoryId,
        input: NewCategory,
    ) -> StoreResult<Option<Category>> {
        self.update_category(id, input).await?;
        self.get_category(id).await
    }

    // Suppliers

    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>>;
    async fn create_supplier(&self, input: NewSupplier) -> StoreResult<Supplier>;
    async fn get_supplier(&self, id: SupplierId) -> StoreResult<Option<Supplier>>;
    async fn update_supplier(&self, id: SupplierId, input: NewSupplier) -> StoreResult<()>;
    async fn delete_supplier(&self, id: SupplierId) -> StoreResult<()>;

    async fn replace_supplier(
        &self,
        id: SupplierId,
        input: NewSupplier,
    ) -> StoreResult<Option<Supplier>> {
        self.update_supplier(id, input).await?;
        self.get_supplier(id).await
    }

    // Products

    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    /// Insert a product; the store assigns `id` and `created_at`.
    async fn create_product(&self, input: NewProduct) -> StoreResult<Product>;
    async fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>>;
    /// Overwrite every column except `id` and `created_at`.
    async fn update_product(&self, id: ProductId, input: NewProduct) -> StoreResult<()>;
    async fn delete_product(&self, id: ProductId) -> StoreResult<()>;

    async fn replace_product(
        &self,
        id: ProductId,
        input: NewProduct,
    ) -> StoreResult<Option<Product>> {
        self.update_product(id, input).await?;
        self.get_product(id).await
    }

    // Inventory (seeding only)

    async fn create_inventory(&self, input: NewInventory) -> StoreResult<Inventory>;

    /// Create any missing tables. Backends without a schema do nothing.
    async fn ensure_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Release backend resources. Called once on shutdown.
    async fn close(&self) {}
}
