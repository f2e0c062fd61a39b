//! JSON response envelopes for the customer endpoints
//!
//! | Body | Used for |
//! |---|---|
//! | `{mensaje, cliente}` | successful create/update |
//! | `{mensaje}` | successful delete, not-found |
//! | `{mensaje, error}` | persistence failure |
//! | `{errors: [...]}` | validation failure |

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::validation::FieldError;

/// HTTP 201 Created response
///
/// Optionally includes a `Location` header pointing to the resource.
#[derive(Debug)]
pub struct Created<T> {
    data: T,
    location: Option<String>,
}

impl<T> Created<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(&self.data)).into_response();

        if let Some(location) = self.location {
            if let Ok(header_value) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(header::LOCATION, header_value);
            }
        }

        response
    }
}

/// `{mensaje, cliente}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEnvelope {
    pub mensaje: String,
    pub cliente: Customer,
}

impl CustomerEnvelope {
    pub fn new(mensaje: impl Into<String>, cliente: Customer) -> Self {
        Self {
            mensaje: mensaje.into(),
            cliente,
        }
    }
}

/// `{mensaje}` with an optional technical `error` detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub mensaje: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Message {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
            error: None,
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl IntoResponse for Message {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// `{errors: ["Field 'x' ..."]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}

impl From<&[FieldError]> for ValidationErrors {
    fn from(fields: &[FieldError]) -> Self {
        Self {
            errors: fields.iter().map(ToString::to_string).collect(),
        }
    }
}
