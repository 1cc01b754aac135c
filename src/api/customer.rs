//! Customer endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::debug;

use super::state::AppState;
use super::types::ApiError;
use crate::domain::Customer;

/// Create the customer router
pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/customer", get(list_customers))
        .route("/customer/save/save", get(save_customer))
        .route("/customer/{name}", get(get_customer_by_name))
}

/// GET /customer
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    debug!("Listing all customers");

    let customers = state.customer_service.find_all().await?;

    Ok(Json(customers))
}

/// GET /customer/save/save
///
/// Inserts a placeholder customer; 204 when the store returns no row.
pub async fn save_customer(State(state): State<AppState>) -> Result<Response, ApiError> {
    let saved = state.customer_service.save_placeholder().await?;

    Ok(match saved {
        Some(customer) => Json(customer).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /customer/{name}
pub async fn get_customer_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    debug!(name = %name, "Looking up customer by name");

    let customer = state.customer_service.find_by_name(&name).await?;

    Ok(Json(customer))
}
