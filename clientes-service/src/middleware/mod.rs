//! Middleware for authentication, role gating and request tracking

pub mod jwt;
pub mod request_tracking;
pub mod roles;
pub mod token;

pub use jwt::JwtAuth;
pub use request_tracking::{
    request_id_layer, request_id_propagation_layer, sensitive_headers_layer, MakeTypedRequestId,
    SENSITIVE_HEADERS,
};
pub use roles::RoleGuard;
pub use token::{Claims, Role, TokenValidator};
