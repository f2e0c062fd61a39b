//! Bearer token claims and extraction

use std::fmt;
use std::str::FromStr;

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Roles recognised by the customer endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::User => "ROLE_USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, with or without the `ROLE_` prefix
impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(format!("unknown role: {}", s)),
        }
    }
}

/// Claims carried by an authenticated request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user name or ID)
    pub sub: String,

    #[serde(default)]
    pub roles: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl Claims {
    /// Roles in the token that this service knows about
    pub fn known_roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().filter_map(|r| r.parse().ok())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.known_roles().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.known_roles().any(|r| roles.contains(&r))
    }
}

/// Token validator trait
pub trait TokenValidator: Send + Sync + Clone {
    /// Validate a token and extract claims
    fn validate_token(&self, token: &str) -> Result<Claims, Error>;
}

/// Extract token from Authorization header (Bearer scheme)
pub fn extract_token(headers: &HeaderMap) -> Result<&str, Error> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Error::Unauthorized("Missing Authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::Unauthorized("Invalid Authorization header format".to_string()))
}
