use serde::{Deserialize, Serialize};

use stockroom_core::SupplierId;

use crate::rules::{FieldRule, Validate};

/// A supplier of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Supplier {
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: SupplierId,
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
}

/// Body for creating or replacing a supplier.
///
/// Omitted contact fields are stored as null, including on replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewSupplier {
    #[cfg_attr(feature = "openapi", schema(max_length = 255, example = "Acme Parts"))]
    pub name: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(max_length = 255))]
    pub contact_email: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(max_length = 64))]
    pub phone: Option<String>,
}

impl NewSupplier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_email: None,
            phone: None,
        }
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn into_record(self, id: SupplierId) -> Supplier {
        Supplier {
            id,
            name: self.name,
            contact_email: self.contact_email,
            phone: self.phone,
        }
    }
}

const SUPPLIER_RULES: &[FieldRule] = &[
    FieldRule::required("name", 255),
    FieldRule::optional("contact_email", Some(255)),
    FieldRule::optional("phone", Some(64)),
];

impl Validate for NewSupplier {
    fn rules() -> &'static [FieldRule] {
        SUPPLIER_RULES
    }

    fn text(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "contact_email" => self.contact_email.as_deref(),
            "phone" => self.phone.as_deref(),
            _ => None,
        }
    }
}
