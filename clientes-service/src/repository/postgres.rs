//! PostgreSQL customer storage

use sqlx::PgPool;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{Repository, RepositoryResult};
use crate::customer::{Customer, CustomerPayload};

const COLUMNS: &str = "id, name, email, phone, created_at";

/// Customer repository on the `clientes` table
#[derive(Debug, Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `clientes` table if it does not exist yet.
    pub async fn bootstrap(&self) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clientes (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Bootstrap, e))?;

        tracing::debug!("clientes table ready");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Repository<i64, Customer, CustomerPayload> for PgCustomerRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(&format!("SELECT {COLUMNS} FROM clientes ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::FindAll, e))
    }

    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(&format!("SELECT {COLUMNS} FROM clientes WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(RepositoryOperation::FindById, e)
                    .with_entity("Customer", id.to_string())
            })
    }

    async fn create(&self, data: CustomerPayload) -> RepositoryResult<Customer> {
        sqlx::query_as::<_, Customer>(&format!(
            "INSERT INTO clientes (name, email, phone) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Create, e))
    }

    async fn save(&self, entity: Customer) -> RepositoryResult<Customer> {
        let id = entity.id;
        sqlx::query_as::<_, Customer>(&format!(
            "UPDATE clientes SET name = $2, email = $3, phone = $4 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(entity.name)
        .bind(entity.email)
        .bind(entity.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_sqlx(RepositoryOperation::Save, e)
                .with_entity("Customer", id.to_string())
        })?
        .ok_or_else(|| {
            RepositoryError::not_found("Customer", id.to_string())
                .with_operation(RepositoryOperation::Save)
        })
    }

    async fn delete(&self, entity: &Customer) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(entity.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_sqlx(RepositoryOperation::Delete, e)
                    .with_entity("Customer", entity.id.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Customer", entity.id.to_string())
                .with_operation(RepositoryOperation::Delete));
        }
        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Ping, e))
    }
}
