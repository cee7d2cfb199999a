//! Load the demo catalog into the configured Postgres database.
//!
//! Not idempotent; run it once against an empty schema.

use anyhow::{bail, Context};
use tracing::info;

use stockroom_infra::{
    seed::seed_demo_data, AppConfig, CatalogStore, PostgresCatalogStore, StoreConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let StoreConfig::Postgres {
        database_url,
        max_connections,
    } = &config.store
    else {
        bail!("seeding needs STOCKROOM_STORE=postgres and a DATABASE_URL");
    };

    let store = PostgresCatalogStore::connect(database_url, *max_connections)
        .await
        .context("failed to connect to postgres")?;
    store.ensure_schema().await.context("failed to create schema")?;

    let summary = seed_demo_data(&store).await.context("seeding failed")?;
    info!(
        categories = summary.categories,
        suppliers = summary.suppliers,
        products = summary.products,
        inventory = summary.inventory,
        "seed complete"
    );

    store.close().await;
    Ok(())
}
