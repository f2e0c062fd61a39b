//! Handler trait for REST collection endpoints
//!
//! Uses RPITIT like the repository traits. Implementations own the
//! request-level rules (validation, not-found branching, error shaping) and
//! leave status codes and envelopes to the HTTP functions in this module's
//! parent.

use std::future::Future;

use super::error::ApiError;

/// Standard collection operations (list, get, create, update, delete)
pub trait CollectionHandler<Id, Entity, Dto>: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<Entity>, ApiError>> + Send;

    fn get(&self, id: Id) -> impl Future<Output = Result<Entity, ApiError>> + Send;

    fn create(&self, dto: Dto) -> impl Future<Output = Result<Entity, ApiError>> + Send;

    /// Replace the mutable fields of an existing entity
    fn update(&self, id: Id, dto: Dto) -> impl Future<Output = Result<Entity, ApiError>> + Send;

    fn delete(&self, id: Id) -> impl Future<Output = Result<(), ApiError>> + Send;
}
