//! Database connection pool management

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::{
    config::DatabaseConfig,
    error::{sanitize_url, Error, Result},
    repository::PgCustomerRepository,
};

/// Connect to `url` and make sure the `clientes` table exists
pub async fn connect_repository(url: &str, config: &DatabaseConfig) -> Result<PgCustomerRepository> {
    let repository = PgCustomerRepository::new(create_pool(url, config).await?);
    repository.bootstrap().await?;
    Ok(repository)
}

/// Create a PostgreSQL connection pool for `url`
///
/// Retries up to `max_retries` times with exponential backoff starting at
/// `retry_delay_secs`.
pub async fn create_pool(url: &str, config: &DatabaseConfig) -> Result<PgPool> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_create_pool(url, config).await {
            Ok(pool) => {
                if attempt > 0 {
                    tracing::info!(
                        "Database connection established after {} attempt(s)",
                        attempt + 1
                    );
                } else {
                    tracing::info!(
                        "Database connection pool created: max={}, min={}",
                        config.max_connections,
                        config.min_connections
                    );
                }
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        "Failed to connect to database after {} attempts: {}",
                        config.max_retries + 1,
                        e
                    );
                    return Err(e);
                }

                let delay = backoff_delay(base_delay, attempt);
                tracing::warn!(
                    "Database connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
}

async fn try_create_pool(url: &str, config: &DatabaseConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect(url)
        .await
        .map_err(|e| {
            Error::Internal(format!(
                "Failed to connect to database at '{}' ({}): {}",
                sanitize_url(url),
                categorize_db_error(&e),
                e
            ))
        })
}

/// Categorize database error for better operator guidance
fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error;
    match err {
        Error::Configuration(_) => "configuration error",
        Error::Database(_) => "database rejected the connection",
        Error::Io(_) => "network I/O error, check connectivity",
        Error::Tls(_) => "TLS error, check certificate configuration",
        Error::PoolTimedOut => "connection pool timeout",
        Error::PoolClosed => "connection pool closed",
        _ => "connection error",
    }
}
