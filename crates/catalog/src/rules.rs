//! Declarative validation rules for request bodies.
//!
//! Each input type publishes a static table of `FieldRule`s mirroring the
//! column constraints (`NOT NULL`, `VARCHAR(n)`). Type and presence checks of
//! the JSON itself happen earlier, during deserialization.

use stockroom_core::{DomainError, DomainResult};

/// Constraint on a single text field of an input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    /// Field must be present and contain something other than whitespace.
    pub required: bool,
    /// Maximum length in characters, matching the `VARCHAR(n)` column.
    pub max_len: Option<usize>,
}

impl FieldRule {
    pub const fn required(field: &'static str, max_len: usize) -> Self {
        Self {
            field,
            required: true,
            max_len: Some(max_len),
        }
    }

    pub const fn optional(field: &'static str, max_len: Option<usize>) -> Self {
        Self {
            field,
            required: false,
            max_len,
        }
    }

    /// Check one value against this rule.
    pub fn check(&self, value: Option<&str>) -> DomainResult<()> {
        match value {
            None if self.required => Err(DomainError::validation(format!(
                "{} is required",
                self.field
            ))),
            None => Ok(()),
            Some(v) => {
                if self.required && v.trim().is_empty() {
                    return Err(DomainError::validation(format!(
                        "{} must not be blank",
                        self.field
                    )));
                }
                self.check_column(v)
            }
        }
    }

    /// The part of `check` that the text column itself enforces: Postgres
    /// text cannot hold NUL, and `VARCHAR(n)` bounds the length.
    pub fn check_column(&self, value: &str) -> DomainResult<()> {
        if value.contains('\0') {
            return Err(DomainError::validation(format!(
                "{} must not contain NUL characters",
                self.field
            )));
        }
        if let Some(max) = self.max_len {
            let len = value.chars().count();
            if len > max {
                return Err(DomainError::validation(format!(
                    "{} must be at most {max} characters (got {len})",
                    self.field
                )));
            }
        }
        Ok(())
    }
}

/// Input types that carry a rule table.
pub trait Validate {
    /// Rules applied by `validate`, in order.
    fn rules() -> &'static [FieldRule];

    /// Current value of a text field named in `rules()`.
    fn text(&self, field: &str) -> Option<&str>;

    /// Apply every rule; the first failure wins.
    fn validate(&self) -> DomainResult<()> {
        for rule in Self::rules() {
            rule.check(self.text(rule.field))?;
        }
        Ok(())
    }

    /// Column-level checks only; blank required fields pass.
    fn check_columns(&self) -> DomainResult<()> {
        for rule in Self::rules() {
            if let Some(value) = self.text(rule.field) {
                rule.check_column(value)?;
            }
        }
        Ok(())
    }
}
