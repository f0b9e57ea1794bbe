//! Admin Handlers
//!
//! Retailer ids in paths are retailer ids, not user ids.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    LoginRequest, LoginResponse, OrderDetail, OrderStatus, Product, RetailerAccount, Role, User,
};

use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::db;
use crate::orders;
use crate::services::{accounts, catalog, retailers};
use crate::state::AppState;

/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    Ok(Json(accounts::login(&state.pool, &state.jwt, req, Role::Admin).await?))
}

/// GET /admin/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(Json(db::users::list_all(&state.pool).await?))
}

/// GET /admin/retailers
pub async fn list_retailers(State(state): State<AppState>) -> ApiResult<Vec<RetailerAccount>> {
    Ok(Json(db::retailers::list_accounts(&state.pool).await?))
}

/// GET /admin/pending-retailers
pub async fn list_pending_retailers(State(state): State<AppState>) -> ApiResult<Vec<RetailerAccount>> {
    Ok(Json(db::retailers::list_pending_accounts(&state.pool).await?))
}

/// GET /admin/products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    Ok(Json(catalog::list_all_products(&state.pool).await?))
}

/// GET /admin/orders - every order with the customer's username
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Vec<OrderDetail>> {
    Ok(Json(orders::list_all(&state.pool).await?))
}

/// POST /admin/approve-retailer/{id}
pub async fn approve_retailer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<RetailerAccount> {
    tracing::info!(admin_id = user.id, retailer_id = id, "Approving retailer");
    Ok(Json(retailers::approve(&state.pool, &state.notifier, id).await?))
}

/// POST /admin/reject-retailer/{id}
pub async fn reject_retailer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<RetailerAccount> {
    tracing::info!(admin_id = user.id, retailer_id = id, "Rejecting retailer");
    Ok(Json(retailers::reject(&state.pool, &state.notifier, id).await?))
}

/// POST /admin/block-retailer/{id}
pub async fn block_retailer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<RetailerAccount> {
    tracing::info!(admin_id = user.id, retailer_id = id, "Blocking retailer");
    Ok(Json(retailers::block(&state.pool, &state.notifier, id).await?))
}

/// POST /admin/orders/{order_id}/approve - placed to confirmed
pub async fn approve_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> ApiResult<OrderDetail> {
    let updated =
        orders::update_status(&state.pool, &state.notifier, order_id, OrderStatus::Confirmed).await?;
    Ok(Json(updated))
}
