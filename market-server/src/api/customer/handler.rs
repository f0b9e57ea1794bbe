//! Customer Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    LoginRequest, LoginResponse, Product, RegisterCustomerRequest, RegisterResponse, Role,
    RetailerSummary,
};

use crate::api::ApiResult;
use crate::services::{accounts, catalog};
use crate::state::AppState;

/// POST /customer/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterCustomerRequest>,
) -> ApiResult<RegisterResponse> {
    Ok(Json(accounts::register_customer(&state.pool, req).await?))
}

/// POST /customer/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    Ok(Json(accounts::login(&state.pool, &state.jwt, req, Role::Customer).await?))
}

/// GET /customer/cities
pub async fn cities(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    Ok(Json(catalog::list_cities(&state.pool).await?))
}

/// GET /customer/retailers/{city}
pub async fn retailers(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> ApiResult<Vec<RetailerSummary>> {
    Ok(Json(catalog::list_retailers(&state.pool, &city).await?))
}

/// GET /customer/products/{retailer_id} - 404 when nothing is for sale
pub async fn products(
    State(state): State<AppState>,
    Path(retailer_id): Path<i64>,
) -> ApiResult<Vec<Product>> {
    Ok(Json(catalog::list_products(&state.pool, retailer_id).await?))
}
