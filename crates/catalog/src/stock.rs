//! Stock-keeping tables: inventory levels and orders.
//!
//! These rows exist in the schema but have no HTTP surface. Inventory rows
//! are written by the demo seeder; orders are declared for completeness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{InventoryId, OrderId, OrderItemId, ProductId};

/// Status assigned to new orders when none is given.
pub const DEFAULT_ORDER_STATUS: &str = "pending";

/// Stock level of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: InventoryId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub restock_threshold: i32,
}

/// Insert body for an inventory row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventory {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub restock_threshold: i32,
}

impl NewInventory {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 0,
            restock_threshold: 0,
        }
    }

    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_restock_threshold(mut self, threshold: i32) -> Self {
        self.restock_threshold = threshold;
        self
    }

    pub fn into_record(self, id: InventoryId) -> Inventory {
        Inventory {
            id,
            product_id: self.product_id,
            quantity: self.quantity,
            restock_threshold: self.restock_threshold,
        }
    }
}

/// Customer order header. `status` is free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub total_cents: i32,
    pub status: String,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price_cents: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_defaults_to_empty_stock() {
        let inv: NewInventory = serde_json::from_str(r#"{"product_id":4}"#).unwrap();
        assert_eq!(inv, NewInventory::new(ProductId::new(4)));
    }


    #[test]
    fn order_round_trips_status_verbatim() {
        let order = Order {
            id: OrderId::new(1),
            created_at: Utc::now(),
            total_cents: 0,
            status: DEFAULT_ORDER_STATUS.to_string(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "pending");
    }
}
