//! Retailer Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    InventoryUpdate, LoginRequest, LoginResponse, OrderDetail, OrderStatus, Product,
    RegisterResponse, RegisterRetailerRequest, Role,
};

use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::auth::access::ensure_retailer_owner;
use crate::orders;
use crate::services::{accounts, catalog, inventory};
use crate::state::AppState;

/// POST /retailer/register - account starts pending
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRetailerRequest>,
) -> ApiResult<RegisterResponse> {
    Ok(Json(accounts::register_retailer(&state.pool, req).await?))
}

/// POST /retailer/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    Ok(Json(accounts::login(&state.pool, &state.jwt, req, Role::Retailer).await?))
}

/// GET /retailer/inventory/{retailer_id}
pub async fn list_inventory(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(retailer_id): Path<i64>,
) -> ApiResult<Vec<Product>> {
    ensure_retailer_owner(&state.pool, &user, retailer_id).await?;
    Ok(Json(catalog::list_retailer_products(&state.pool, retailer_id).await?))
}

/// PUT /retailer/inventory/update - address the product by name
pub async fn update_inventory(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<InventoryUpdate>,
) -> ApiResult<Product> {
    ensure_retailer_owner(&state.pool, &user, req.retailer_id).await?;
    Ok(Json(inventory::update_inventory(&state.pool, req).await?))
}

/// PUT /retailer/order/{order_id}/dispatch
pub async fn dispatch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(order_id): Path<i64>,
) -> ApiResult<OrderDetail> {
    advance(&state, &user, order_id, OrderStatus::Dispatched).await
}

/// PUT /retailer/order/{order_id}/deliver
pub async fn deliver(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(order_id): Path<i64>,
) -> ApiResult<OrderDetail> {
    advance(&state, &user, order_id, OrderStatus::Delivered).await
}

async fn advance(
    state: &AppState,
    user: &CurrentUser,
    order_id: i64,
    next: OrderStatus,
) -> ApiResult<OrderDetail> {
    let order = orders::get_order(&state.pool, order_id).await?;
    ensure_retailer_owner(&state.pool, user, order.order.retailer_id).await?;
    let updated = orders::update_status(&state.pool, &state.notifier, order_id, next).await?;
    Ok(Json(updated))
}
