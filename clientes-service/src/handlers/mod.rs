//! HTTP endpoints for the customer collection
//!
//! The axum functions here only translate between HTTP and
//! [`CollectionHandler`]: they pick the success status and envelope, while
//! every failure arrives as an [`ApiError`] that renders itself.
//!
//! | Function | Success |
//! |---|---|
//! | [`list_customers`] | 200, array of customers |
//! | [`get_customer`] | 200, customer object |
//! | [`create_customer`] | 201, `{mensaje, cliente}` |
//! | [`update_customer`] | 201, `{mensaje, cliente}` |
//! | [`delete_customer`] | 200, `{mensaje}` |

mod customers;
mod error;
mod traits;

pub use customers::CustomerHandler;
pub use error::{ApiError, ApiErrorKind, ApiOperation};
pub use traits::CollectionHandler;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    customer::{Customer, CustomerPayload},
    repository::CustomerRepository,
    responses::{Created, CustomerEnvelope, Message},
    state::AppState,
};

pub const CREATED_MESSAGE: &str = "The customer has been created successfully!";
pub const UPDATED_MESSAGE: &str = "The customer has been updated successfully!";
pub const DELETED_MESSAGE: &str = "The customer has been deleted successfully!";

fn location(id: i64) -> String {
    format!("/api/clientes/{}", id)
}

pub async fn list_customers<R: CustomerRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    state.customers().list().await.map(Json)
}

pub async fn get_customer<R: CustomerRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, ApiError> {
    state.customers().get(id).await.map(Json)
}

pub async fn create_customer<R: CustomerRepository>(
    State(state): State<AppState<R>>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Created<CustomerEnvelope>, ApiError> {
    let customer = state.customers().create(payload).await?;
    let location = location(customer.id);
    Ok(Created::new(CustomerEnvelope::new(CREATED_MESSAGE, customer)).with_location(location))
}

/// Responds 201 rather than 200; existing clients depend on it.
pub async fn update_customer<R: CustomerRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Created<CustomerEnvelope>, ApiError> {
    let customer = state.customers().update(id, payload).await?;
    Ok(Created::new(CustomerEnvelope::new(UPDATED_MESSAGE, customer)).with_location(location(id)))
}

pub async fn delete_customer<R: CustomerRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<Message, ApiError> {
    state.customers().delete(id).await?;
    Ok(Message::new(DELETED_MESSAGE))
}
