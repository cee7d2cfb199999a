use serde::{Deserialize, Serialize};

use stockroom_core::CategoryId;

use crate::rules::{FieldRule, Validate};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Category {
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: CategoryId,
    pub name: String,
}

/// Body for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewCategory {
    #[cfg_attr(feature = "openapi", schema(max_length = 255, example = "Laptops"))]
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Materialize the stored row for a freshly assigned id.
    pub fn into_record(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
        }
    }
}

const CATEGORY_RULES: &[FieldRule] = &[FieldRule::required("name", 255)];

impl Validate for NewCategory {
    fn rules() -> &'static [FieldRule] {
        CATEGORY_RULES
    }

    fn text(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            _ => None,
        }
    }
}
