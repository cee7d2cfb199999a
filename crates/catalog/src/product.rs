use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, ProductId, SupplierId};

use crate::rules::{FieldRule, Validate};

/// A sellable product.
///
/// `sku` is unique across all products. `created_at` is assigned once on
/// insert and never rewritten by a replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub category_id: Option<CategoryId>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub supplier_id: Option<SupplierId>,
    pub created_at: DateTime<Utc>,
}

/// Body for creating or replacing a product.
///
/// This is a full record: on replace, omitted optional fields become null and
/// an omitted `price_cents` becomes 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewProduct {
    #[cfg_attr(feature = "openapi", schema(max_length = 64, example = "LAP-1000"))]
    pub sku: String,
    #[cfg_attr(feature = "openapi", schema(max_length = 255, example = "Super Laptop A"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_cents: i32,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub supplier_id: Option<SupplierId>,
}

impl NewProduct {
    pub fn new(sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            description: None,
            price_cents: 0,
            category_id: None,
            supplier_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price_cents(mut self, price_cents: i32) -> Self {
        self.price_cents = price_cents;
        self
    }

    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn from_supplier(mut self, supplier_id: SupplierId) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    pub fn into_record(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            sku: self.sku,
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            category_id: self.category_id,
            supplier_id: self.supplier_id,
            created_at,
        }
    }
}

const PRODUCT_RULES: &[FieldRule] = &[
    FieldRule::required("sku", 64),
    FieldRule::required("name", 255),
    FieldRule::optional("description", None),
];

impl Validate for NewProduct {
    fn rules() -> &'static [FieldRule] {
        PRODUCT_RULES
    }

    fn text(&self, field: &str) -> Option<&str> {
        match field {
            "sku" => Some(&self.sku),
            "name" => Some(&self.name),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}
