//! Application state shared by every request

use std::sync::Arc;

use crate::{
    config::Config,
    handlers::CustomerHandler,
    middleware::JwtAuth,
    repository::CustomerRepository,
    validation::CustomerSchema,
};

/// Router state, generic over the customer repository
#[derive(Clone)]
pub struct AppState<R> {
    config: Arc<Config>,
    customers: CustomerHandler<R>,
    auth: JwtAuth,
}

impl<R: CustomerRepository> AppState<R> {
    /// Wire a repository into the service, deriving the schema from `config`
    pub fn new(config: Config, repository: R, auth: JwtAuth) -> Self {
        let schema = CustomerSchema::from_config(&config.validation);
        Self::with_schema(config, repository, schema, auth)
    }

    pub fn with_schema(config: Config, repository: R, schema: CustomerSchema, auth: JwtAuth) -> Self {
        Self {
            config: Arc::new(config),
            customers: CustomerHandler::new(repository, schema),
            auth,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn customers(&self) -> &CustomerHandler<R> {
        &self.customers
    }

    pub fn auth(&self) -> &JwtAuth {
        &self.auth
    }
}
