//! Shared building blocks for the stockroom catalog.
//!
//! Error taxonomy and strongly-typed identifiers; no IO lives here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, InventoryId, OrderId, OrderItemId, ProductId, SupplierId};
