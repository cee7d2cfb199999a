//! Infrastructure layer: catalog storage, schema, configuration, seeding.

pub mod config;
pub mod schema;
pub mod seed;
pub mod store;

pub use config::{AppConfig, ConfigError, StoreConfig};
pub use store::{CatalogStore, InMemoryCatalogStore, PostgresCatalogStore, StoreError, StoreResult};
