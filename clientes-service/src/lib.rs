//! # clientes-service
//!
//! CRUD HTTP API over a single customer (`cliente`) resource, with role-gated
//! endpoints authenticated by bearer JWTs.
//!
//! ## Features
//!
//! - **Endpoints**: list, get, create, update and delete under `/api/clientes`
//! - **Role gating**: `ROLE_ADMIN` for writes, `ROLE_ADMIN` or `ROLE_USER` for reads by id
//! - **Validation**: per-field errors collected before anything is persisted
//! - **Storage**: PostgreSQL via sqlx, or an in-memory repository for local runs
//! - **Middleware stack**: request tracking, panic recovery, body size limits, CORS
//! - **Health checks**: liveness and readiness probes
//! - **Graceful shutdown**: SIGTERM and SIGINT
//!
//! ## Example
//!
//! ```rust,no_run
//! use clientes_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let auth = JwtAuth::new(&config.jwt)?;
//!     let state = AppState::new(config.clone(), InMemoryCustomerRepository::new(), auth);
//!
//!     Server::new(config).serve(router(state)).await
//! }
//! ```

pub mod config;
pub mod customer;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod observability;
pub mod repository;
pub mod responses;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        Config, DatabaseConfig, JwtConfig, MiddlewareConfig, ServiceConfig, ValidationConfig,
    };
    pub use crate::customer::{Customer, CustomerPayload};
    pub use crate::database::{connect_repository, create_pool};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{ApiError, CollectionHandler, CustomerHandler};
    pub use crate::health::{health, readiness};
    pub use crate::middleware::{Claims, JwtAuth, Role, RoleGuard, TokenValidator};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        CustomerRepository, InMemoryCustomerRepository, PgCustomerRepository, Repository,
        RepositoryError,
    };
    pub use crate::responses::{Created, CustomerEnvelope, Message};
    pub use crate::routes::router;
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::validation::{CustomerSchema, FieldError};
}
