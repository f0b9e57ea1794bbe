//! Product Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::ApiResponse;
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::auth::access::ensure_retailer_owner;
use crate::services::{catalog, inventory};
use crate::state::AppState;

/// GET /api/products/
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    Ok(Json(catalog::list_all_products(&state.pool).await?))
}

/// GET /api/products/retailer/{retailer_id}
pub async fn list_by_retailer(
    State(state): State<AppState>,
    Path(retailer_id): Path<i64>,
) -> ApiResult<Vec<Product>> {
    Ok(Json(catalog::list_retailer_products(&state.pool, retailer_id).await?))
}

/// POST /api/products/
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ProductCreate>,
) -> ApiResult<Product> {
    ensure_retailer_owner(&state.pool, &user, req.retailer_id).await?;
    Ok(Json(inventory::create_product(&state.pool, req).await?))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<ProductUpdate>,
) -> ApiResult<Product> {
    let product = inventory::get_product(&state.pool, id).await?;
    ensure_retailer_owner(&state.pool, &user, product.retailer_id).await?;
    Ok(Json(inventory::update_product(&state.pool, id, req).await?))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    let product = inventory::get_product(&state.pool, id).await?;
    ensure_retailer_owner(&state.pool, &user, product.retailer_id).await?;
    inventory::delete_product(&state.pool, id).await?;
    Ok(Json(ApiResponse::message("Product deleted successfully")))
}
