//! Per-route role gating
//!
//! A [`RoleGuard`] authenticates the bearer token and admits the request only
//! if the claims hold at least one of the allowed roles. Attach it to a method
//! route with `route_layer`:
//!
//! ```rust,ignore
//! let admin = RoleGuard::new(auth, &[Role::Admin]);
//! post(create).route_layer(from_fn_with_state(admin, RoleGuard::middleware))
//! ```
//!
//! Missing or invalid token: 401. Valid token without an allowed role: 403.
//! On success the [`Claims`] are inserted into the request extensions.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::jwt::JwtAuth;
use super::token::{extract_token, Claims, Role, TokenValidator};
use crate::error::Error;

#[derive(Clone)]
pub struct RoleGuard {
    auth: JwtAuth,
    allowed: Arc<[Role]>,
}

impl RoleGuard {
    pub fn new(auth: JwtAuth, allowed: &[Role]) -> Self {
        Self {
            auth,
            allowed: allowed.into(),
        }
    }

    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    /// Check a set of claims against the allowed roles
    pub fn authorize(&self, claims: &Claims) -> Result<(), Error> {
        if claims.has_any_role(&self.allowed) {
            return Ok(());
        }

        let required = self
            .allowed
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(" or ");
        Err(Error::Forbidden(format!("requires {}", required)))
    }

    pub async fn middleware(
        State(guard): State<Self>,
        mut request: Request<Body>,
        next: Next,
    ) -> Result<Response, Error> {
        let claims = extract_token(request.headers())
            .and_then(|token| guard.auth.validate_token(token))
            .inspect_err(|e| tracing::debug!(path = %request.uri().path(), "Rejected token: {}", e))?;

        if let Err(e) = guard.authorize(&claims) {
            tracing::warn!(
                sub = %claims.sub,
                roles = ?claims.roles,
                path = %request.uri().path(),
                "Role check failed"
            );
            return Err(e);
        }

        request.extensions_mut().insert(claims);
        Ok(next.run(request).await)
    }
}
