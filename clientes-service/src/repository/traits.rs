//! Repository trait definitions
//!
//! Async persistence operations using RPITIT (Return Position Impl Trait In
//! Traits), so implementations are plain `async fn`s without `async_trait`.
//!
//! # Example
//!
//! ```rust,ignore
//! use clientes_service::repository::{Repository, RepositoryResult};
//!
//! impl Repository<i64, Customer, CustomerPayload> for MyRepository {
//!     async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Customer>> {
//!         sqlx::query_as("SELECT * FROM clientes WHERE id = $1")
//!             .bind(id)
//!             .fetch_optional(&self.pool)
//!             .await
//!             .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::FindById, e))
//!     }
//!     // ... other methods
//! }
//! ```

use std::future::Future;

use super::error::RepositoryError;
use crate::customer::{Customer, CustomerPayload};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Base repository trait for CRUD operations
///
/// # Type Parameters
///
/// - `Id`: The identifier type for the entity
/// - `Entity`: The full entity type returned from queries
/// - `Create`: The data used to insert a new entity
pub trait Repository<Id, Entity, Create>: Send + Sync {
    /// Every stored entity, ordered by identifier
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    /// Find an entity by its unique identifier
    ///
    /// Returns `Ok(None)` when nothing is stored under `id`.
    fn find_by_id(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Insert a new entity, returning it with its generated fields
    fn create(&self, data: Create) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Write an already persisted entity back to storage
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if the entity was removed in the meantime.
    fn save(&self, entity: Entity) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Remove a previously loaded entity
    fn delete(&self, entity: &Entity) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Check that the backing store is reachable
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send {
        async { Ok(()) }
    }
}

/// Repository bound used by the customer endpoints
pub trait CustomerRepository:
    Repository<i64, Customer, CustomerPayload> + Clone + 'static
{
}

impl<T> CustomerRepository for T where
    T: Repository<i64, Customer, CustomerPayload> + Clone + 'static
{
}
