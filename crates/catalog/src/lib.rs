//! Catalog records and their request inputs.
//!
//! This crate holds the row shapes of the catalog schema together with the
//! create/replace bodies accepted over HTTP. Validation rules are declared as
//! data (`FieldRule` tables) next to each input type; no IO happens here.

pub mod category;
pub mod product;
pub mod rules;
pub mod stock;
pub mod supplier;

pub use category::{Category, NewCategory};
pub use product::{NewProduct, Product};
pub use rules::{FieldRule, Validate};
pub use stock::{DEFAULT_ORDER_STATUS, Inventory, NewInventory, Order, OrderItem};
pub use supplier::{NewSupplier, Supplier};
