//! In-process customer storage
//!
//! Used when no database URL is configured, and by the endpoint tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{Repository, RepositoryResult};
use crate::customer::{Customer, CustomerPayload};

/// Customer repository backed by a shared ordered map
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    rows: Arc<RwLock<BTreeMap<i64, Customer>>>,
    last_id: Arc<AtomicI64>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored customers
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl Repository<i64, Customer, CustomerPayload> for InMemoryCustomerRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Customer>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Customer>> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn create(&self, data: CustomerPayload) -> RepositoryResult<Customer> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let customer = Customer {
            id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            created_at: Utc::now(),
        };
        self.rows.write().await.insert(id, customer.clone());
        Ok(customer)
    }

    async fn save(&self, entity: Customer) -> RepositoryResult<Customer> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&entity.id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(RepositoryError::not_found("Customer", entity.id.to_string())
                .with_operation(RepositoryOperation::Save)),
        }
    }

    async fn delete(&self, entity: &Customer) -> RepositoryResult<()> {
        self.rows
            .write()
            .await
            .remove(&entity.id)
            .map(|_| ())
            .ok_or_else(|| {
                RepositoryError::not_found("Customer", entity.id.to_string())
                    .with_operation(RepositoryOperation::Delete)
            })
    }
}
