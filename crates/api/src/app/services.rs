use std::sync::Arc;

use stockroom_infra::{
    CatalogStore, InMemoryCatalogStore, PostgresCatalogStore, StoreConfig, StoreResult,
};

/// Process-wide handles shared by every request.
///
/// Built once at startup and handed to handlers through an axum `Extension`.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn CatalogStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Services backed by a fresh, empty in-memory store (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCatalogStore::new()))
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    /// Release the store's resources; call after the server has drained.
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}

/// Connect the configured store and make sure its schema exists.
pub async fn build_services(config: &StoreConfig) -> StoreResult<AppServices> {
    match config {
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let store = PostgresCatalogStore::connect(database_url, *max_connections).await?;
            store.ensure_schema().await?;
            tracing::info!(max_connections, "connected to postgres catalog store");
            Ok(AppServices::new(Arc::new(store)))
        }
        StoreConfig::Memory => {
            tracing::warn!("using in-memory catalog store; data will not be persisted");
            Ok(AppServices::in_memory())
        }
    }
}
