//! Order Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    OrderDetail, OrderStatus, PaymentStatus, PlaceOrderRequest, PlaceOrderResponse,
    UpdatePaymentRequest, UpdateStatusRequest,
};

use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::auth::access::{ensure_order_visible, ensure_retailer_owner, ensure_self};
use crate::orders;
use crate::state::AppState;

/// POST /api/orders/
pub async fn place(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<PlaceOrderRequest>,
) -> ApiResult<PlaceOrderResponse> {
    ensure_self(&user, req.customer_id)?;
    Ok(Json(orders::place_order(&state.pool, &state.notifier, req).await?))
}

/// GET /api/orders/user/{user_id} - newest first
pub async fn list_for_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Vec<OrderDetail>> {
    ensure_self(&user, user_id)?;
    Ok(Json(orders::list_for_customer(&state.pool, user_id).await?))
}

/// GET /api/orders/retailer/{retailer_id} - newest first
pub async fn list_for_retailer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(retailer_id): Path<i64>,
) -> ApiResult<Vec<OrderDetail>> {
    ensure_retailer_owner(&state.pool, &user, retailer_id).await?;
    Ok(Json(orders::list_for_retailer(&state.pool, retailer_id).await?))
}

/// GET /api/orders/{order_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(order_id): Path<i64>,
) -> ApiResult<OrderDetail> {
    let detail = orders::get_order(&state.pool, order_id).await?;
    ensure_order_visible(&state.pool, &user, &detail.order).await?;
    Ok(Json(detail))
}

/// PUT /api/orders/{order_id}/status
pub async fn update_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(order_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<OrderDetail> {
    let next: OrderStatus = req.status.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidOrderStatus,
            format!("Unknown order status: {}", req.status),
        )
    })?;
    let current = orders::get_order(&state.pool, order_id).await?;
    ensure_retailer_owner(&state.pool, &user, current.order.retailer_id).await?;
    Ok(Json(orders::update_status(&state.pool, &state.notifier, order_id, next).await?))
}

/// PUT /api/orders/{order_id}/payment
pub async fn update_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(order_id): Path<i64>,
    Json(req): Json<UpdatePaymentRequest>,
) -> ApiResult<OrderDetail> {
    let status: PaymentStatus = req.payment_status.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidPaymentStatus,
            format!("Unknown payment status: {}", req.payment_status),
        )
    })?;
    let current = orders::get_order(&state.pool, order_id).await?;
    ensure_retailer_owner(&state.pool, &user, current.order.retailer_id).await?;
    Ok(Json(orders::update_payment_status(&state.pool, order_id, status).await?))
}
