//! Customer collection handler

use std::sync::Arc;

use tracing::instrument;

use super::error::{ApiError, ApiOperation};
use super::traits::CollectionHandler;
use crate::customer::{Customer, CustomerPayload};
use crate::repository::CustomerRepository;
use crate::validation::CustomerSchema;

/// Request-level customer rules on top of a repository
#[derive(Debug, Clone)]
pub struct CustomerHandler<R> {
    repository: R,
    schema: Arc<CustomerSchema>,
}

impl<R: CustomerRepository> CustomerHandler<R> {
    pub fn new(repository: R, schema: CustomerSchema) -> Self {
        Self {
            repository,
            schema: Arc::new(schema),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn validate(&self, operation: ApiOperation, dto: &CustomerPayload) -> Result<(), ApiError> {
        let errors = self.schema.validate(dto);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(operation, errors))
        }
    }

    async fn load(&self, operation: ApiOperation, id: i64) -> Result<Option<Customer>, ApiError> {
        self.repository
            .find_by_id(&id)
            .await
            .map_err(ApiError::from_repository(operation))
    }
}

impl<R: CustomerRepository> CollectionHandler<i64, Customer, CustomerPayload>
    for CustomerHandler<R>
{
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Customer>, ApiError> {
        self.repository
            .find_all()
            .await
            .map_err(ApiError::from_repository(ApiOperation::List))
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Customer, ApiError> {
        self.load(ApiOperation::Get, id).await?.ok_or_else(|| {
            tracing::debug!(id, "Customer not found");
            ApiError::not_found(id)
        })
    }

    #[instrument(skip(self, dto))]
    async fn create(&self, dto: CustomerPayload) -> Result<Customer, ApiError> {
        self.validate(ApiOperation::Create, &dto)?;

        let customer = self
            .repository
            .create(dto)
            .await
            .map_err(ApiError::from_repository(ApiOperation::Create))?;

        tracing::info!(id = customer.id, "Customer created");
        Ok(customer)
    }

    /// Load first, then validate: an invalid payload is a 400 even for an
    /// unknown id.
    #[instrument(skip(self, dto))]
    async fn update(&self, id: i64, dto: CustomerPayload) -> Result<Customer, ApiError> {
        let current = self.load(ApiOperation::Update, id).await?;
        self.validate(ApiOperation::Update, &dto)?;

        let Some(mut customer) = current else {
            tracing::debug!(id, "Customer not found for update");
            return Err(ApiError::not_found_during(ApiOperation::Update, id));
        };

        dto.apply_to(&mut customer);
        let saved = self
            .repository
            .save(customer)
            .await
            .map_err(ApiError::from_repository(ApiOperation::Update))?;

        tracing::info!(id, "Customer updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let Some(customer) = self.load(ApiOperation::Delete, id).await? else {
            tracing::debug!(id, "Customer not found for delete");
            return Err(ApiError::not_found_during(ApiOperation::Delete, id));
        };

        self.repository
            .delete(&customer)
            .await
            .map_err(ApiError::from_repository(ApiOperation::Delete))?;

        tracing::info!(id, "Customer deleted");
        Ok(())
    }
}
