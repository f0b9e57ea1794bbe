//! Notification Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::Notification;

use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::auth::access::ensure_retailer_owner;
use crate::db;
use crate::state::AppState;

/// GET /api/notifications/retailer/{retailer_id} - newest first
pub async fn list_for_retailer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(retailer_id): Path<i64>,
) -> ApiResult<Vec<Notification>> {
    ensure_retailer_owner(&state.pool, &user, retailer_id).await?;
    Ok(Json(db::notifications::list_by_retailer(&state.pool, retailer_id).await?))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Notification> {
    let not_found = || AppError::new(ErrorCode::NotificationNotFound).with_detail("notification_id", id);
    let notification = db::notifications::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    ensure_retailer_owner(&state.pool, &user, notification.retailer_id).await?;

    db::notifications::mark_read(&state.pool, id).await?;
    let notification = db::notifications::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(notification))
}
