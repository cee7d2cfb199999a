//! Demo data for local development.
//!
//! Inserts through the `CatalogStore` one row at a time with no surrounding
//! transaction; a failure part-way leaves the rows already written.

use stockroom_catalog::{NewCategory, NewInventory, NewProduct, NewSupplier};
use tracing::info;

use crate::store::{CatalogStore, StoreResult};

/// Counts of rows written by `seed_demo_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub categories: usize,
    pub suppliers: usize,
    pub products: usize,
    pub inventory: usize,
}

/// Populate an empty catalog with two categories, one supplier, two products
/// and their stock levels.
///
/// Not idempotent: running it twice fails on the duplicate product skus.
pub async fn seed_demo_data(store: &dyn CatalogStore) -> StoreResult<SeedSummary> {
    info!("seeding demo catalog");
    let mut summary = SeedSummary::default();

    let laptops = store.create_category(NewCategory::new("Laptops")).await?;
    let audio = store.create_category(NewCategory::new("Audio")).await?;
    summary.categories = 2;

    let acme = store
        .create_supplier(NewSupplier::new("Acme Parts").with_contact_email("info@acmeparts.dev"))
        .await?;
    summary.suppliers = 1;

    let laptop = store
        .create_product(
            NewProduct::new("LAP-1000", "Super Laptop A")
                .with_description("Lightweight laptop with long battery life")
                .with_price_cents(99_900)
                .in_category(laptops.id)
                .from_supplier(acme.id),
        )
        .await?;
    let earbuds = store
        .create_product(
            NewProduct::new("EAR-2000", "Noise-Cancelling Earbuds")
                .with_description("Wireless earbuds with ANC")
                .with_price_cents(19_900)
                .in_category(audio.id)
                .from_supplier(acme.id),
        )
        .await?;
    summary.products = 2;

    store
        .create_inventory(
            NewInventory::new(laptop.id)
                .with_quantity(15)
                .with_restock_threshold(5),
        )
        .await?;
    store
        .create_inventory(
            NewInventory::new(earbuds.id)
                .with_quantity(40)
                .with_restock_threshold(10),
        )
        .await?;
    summary.inventory = 2;

    info!(
        categories = summary.categories,
        suppliers = summary.suppliers,
        products = summary.products,
        inventory = summary.inventory,
        "seeded demo categories, suppliers, products, and inventory"
    );
    Ok(summary)
}
