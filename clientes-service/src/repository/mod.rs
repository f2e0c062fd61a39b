//! Customer persistence
//!
//! - [`Repository`]: async CRUD trait the endpoints are written against
//! - [`PgCustomerRepository`]: PostgreSQL implementation on the `clientes` table
//! - [`InMemoryCustomerRepository`]: process-local implementation
//!
//! Lookups return `Ok(None)` for a missing row; only genuine storage failures
//! surface as [`RepositoryError`].

mod error;
mod memory;
mod postgres;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::InMemoryCustomerRepository;
pub use postgres::PgCustomerRepository;
pub use traits::{CustomerRepository, Repository, RepositoryResult};
