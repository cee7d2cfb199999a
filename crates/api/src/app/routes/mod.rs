use axum::{routing::get, Router};

pub mod categories;
pub mod common;
pub mod products;
pub mod suppliers;
pub mod system;

/// Router for the greeting, health probe and the three entity families.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .nest("/api/categories", categories::router())
        .nest("/api/suppliers", suppliers::router())
        .nest("/api/products", products::router())
}
