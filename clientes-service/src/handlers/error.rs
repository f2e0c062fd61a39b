//! Error outcomes of the customer endpoints
//!
//! Every non-success branch of a handler becomes an [`ApiError`], which renders
//! to the client-facing envelopes from [`crate::responses`].
//!
//! # Example
//!
//! ```rust
//! use clientes_service::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::not_found(42);
//! assert_eq!(error.kind, ApiErrorKind::NotFound);
//! assert!(error.message.contains("42"));
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::repository::RepositoryError;
use crate::responses::{Message, ValidationErrors};
use crate::validation::FieldError;

/// Endpoint operation that produced the error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl ApiOperation {
    /// Friendly message reported when persistence fails during this operation
    pub const fn persistence_message(&self) -> &'static str {
        match self {
            Self::List | Self::Get => "Error querying the database",
            Self::Create => "Error saving the customer to the database",
            Self::Update => "Error updating the customer in the database",
            Self::Delete => "Error deleting the customer from the database",
        }
    }

    /// Message reported when `id` is absent during this operation
    pub fn not_found_message(&self, id: i64) -> String {
        match self {
            Self::Update => format!(
                "Error: could not edit, customer ID: {} does not exist in the database!",
                id
            ),
            Self::Delete => format!(
                "Error: could not delete, customer ID: {} does not exist in the database!",
                id
            ),
            Self::List | Self::Get | Self::Create => {
                format!("Customer ID: {} does not exist in the database!", id)
            }
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of endpoint error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    NotFound,
    ValidationFailed,
    PersistenceFailed,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::PersistenceFailed => write!(f, "persistence_failed"),
        }
    }
}

impl ApiErrorKind {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ValidationFailed => StatusCode::BAD_REQUEST,
            Self::PersistenceFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structured endpoint error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub operation: ApiOperation,
    pub kind: ApiErrorKind,
    /// Client-facing `mensaje`
    pub message: String,
    /// Technical detail, reported as `error`
    pub detail: Option<String>,
    pub field_errors: Vec<FieldError>,
}

impl ApiError {
    /// No customer under `id`
    pub fn not_found(id: i64) -> Self {
        Self::not_found_during(ApiOperation::Get, id)
    }

    /// No customer under `id` while performing `operation`
    pub fn not_found_during(operation: ApiOperation, id: i64) -> Self {
        Self {
            operation,
            kind: ApiErrorKind::NotFound,
            message: operation.not_found_message(id),
            detail: None,
            field_errors: Vec::new(),
        }
    }

    /// Payload rejected by the customer schema
    pub fn validation(operation: ApiOperation, field_errors: Vec<FieldError>) -> Self {
        Self {
            operation,
            kind: ApiErrorKind::ValidationFailed,
            message: "Validation failed".to_string(),
            detail: None,
            field_errors,
        }
    }

    /// Repository call failed while performing `operation`
    pub fn persistence(operation: ApiOperation, err: &RepositoryError) -> Self {
        Self {
            operation,
            kind: ApiErrorKind::PersistenceFailed,
            message: operation.persistence_message().to_string(),
            detail: Some(err.to_string()),
            field_errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Map a repository failure for use with `?`
    pub fn from_repository(operation: ApiOperation) -> impl FnOnce(RepositoryError) -> Self {
        move |err| {
            tracing::error!(
                %operation,
                repository_operation = %err.operation,
                kind = %err.kind,
                retriable = err.is_retriable(),
                "Repository error: {}", err.message
            );
            Self::persistence(operation, &err)
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(ref detail) = self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        match self.kind {
            ApiErrorKind::ValidationFailed => {
                tracing::debug!(
                    operation = %self.operation,
                    fields = self.field_errors.len(),
                    "Rejected customer payload"
                );
                (
                    status,
                    Json(ValidationErrors::from(self.field_errors.as_slice())),
                )
                    .into_response()
            }
            ApiErrorKind::NotFound | ApiErrorKind::PersistenceFailed => {
                let mut body = Message::new(self.message);
                body.error = self.detail;
                (status, Json(body)).into_response()
            }
        }
    }
}
