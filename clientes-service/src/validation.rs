//! Customer payload validation
//!
//! [`CustomerSchema`] is built once from [`ValidationConfig`] and evaluated
//! against each [`CustomerPayload`]. Every field reports at most one
//! violation, and violations come back in field order: name, email, phone.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{ValidateEmail, ValidateLength};

use crate::{config::ValidationConfig, customer::CustomerPayload};

/// A single field-level constraint violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }

    fn empty(field: &str) -> Self {
        Self::new(field, "NOT_EMPTY", "must not be empty")
    }

    fn too_long(field: &str, max: u64) -> Self {
        Self::new(field, "SIZE", format!("size must be at most {}", max))
    }
}

/// Renders as `Field '<name>' <message>`, the form clients receive
impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field '{}' {}", self.field, self.message)
    }
}

/// Validation rules for customer payloads
#[derive(Debug, Clone)]
pub struct CustomerSchema {
    name_max_length: u64,
    email_max_length: u64,
    phone_required: bool,
    phone_max_length: u64,
}

impl Default for CustomerSchema {
    fn default() -> Self {
        Self::from_config(&ValidationConfig::default())
    }
}

impl CustomerSchema {
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self {
            name_max_length: config.name_max_length,
            email_max_length: config.email_max_length,
            phone_required: config.phone_required,
            phone_max_length: config.phone_max_length,
        }
    }

    /// Make `phone` mandatory
    #[must_use]
    pub fn require_phone(mut self) -> Self {
        self.phone_required = true;
        self
    }

    /// Check a payload; an empty result means it is valid.
    pub fn validate(&self, payload: &CustomerPayload) -> Vec<FieldError> {
        [
            self.check_name(&payload.name),
            self.check_email(&payload.email),
            self.check_phone(payload.phone.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn check_name(&self, name: &str) -> Option<FieldError> {
        if name.trim().is_empty() {
            return Some(FieldError::empty("name"));
        }
        if !name.validate_length(None, Some(self.name_max_length), None) {
            return Some(FieldError::too_long("name", self.name_max_length));
        }
        None
    }

    fn check_email(&self, email: &str) -> Option<FieldError> {
        if email.trim().is_empty() {
            return Some(FieldError::empty("email"));
        }
        if !email.validate_email() {
            return Some(FieldError::new(
                "email",
                "EMAIL",
                "must be a well-formed email address",
            ));
        }
        if !email.validate_length(None, Some(self.email_max_length), None) {
            return Some(FieldError::too_long("email", self.email_max_length));
        }
        None
    }

    fn check_phone(&self, phone: Option<&str>) -> Option<FieldError> {
        match phone.map(str::trim) {
            None | Some("") if self.phone_required => Some(FieldError::empty("phone")),
            Some(p) if !p.validate_length(None, Some(self.phone_max_length), None) => {
                Some(FieldError::too_long("phone", self.phone_max_length))
            }
            _ => None,
        }
    }
}
