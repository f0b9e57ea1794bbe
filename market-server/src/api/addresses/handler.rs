//! Address Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, ApiResponse, ErrorCode};
use shared::models::{Address, AddressCreate, AddressUpdate};
use sqlx::SqlitePool;

use crate::api::ApiResult;
use crate::auth::CurrentUser;
use crate::auth::access::ensure_self;
use crate::db;
use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;

fn address_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::AddressNotFound).with_detail("address_id", id)
}

fn require_text(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} is required"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Load an address the caller owns
async fn owned_address(pool: &SqlitePool, user: &CurrentUser, id: i64) -> ServiceResult<Address> {
    let address = db::addresses::find_by_id(pool, id)
        .await?
        .ok_or_else(|| address_not_found(id))?;
    ensure_self(user, address.user_id)?;
    Ok(address)
}

/// POST /api/addresses/
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<AddressCreate>,
) -> ApiResult<Address> {
    ensure_self(&user, req.user_id)?;
    require_text("address_line1", &req.address_line1)?;
    require_text("city", &req.city)?;
    require_text("state", &req.state)?;
    require_text("pincode", &req.pincode)?;

    let id = db::addresses::create(&state.pool, &req).await?;
    tracing::info!(address_id = id, user_id = req.user_id, "Address created");
    let address = db::addresses::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| address_not_found(id))?;
    Ok(Json(address))
}

/// GET /api/addresses/user/{user_id} - 404 when the user has none
pub async fn list_for_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Vec<Address>> {
    ensure_self(&user, user_id)?;
    let addresses = db::addresses::list_by_user(&state.pool, user_id).await?;
    if addresses.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::AddressNotFound,
            "No addresses found for this user",
        )
        .into());
    }
    Ok(Json(addresses))
}

/// PUT /api/addresses/{id}
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<AddressUpdate>,
) -> ApiResult<Address> {
    owned_address(&state.pool, &user, id).await?;
    for (field, value) in [
        ("address_line1", &req.address_line1),
        ("city", &req.city),
        ("state", &req.state),
        ("pincode", &req.pincode),
    ] {
        if let Some(value) = value {
            require_text(field, value)?;
        }
    }

    if !db::addresses::update(&state.pool, id, &req).await? {
        return Err(address_not_found(id).into());
    }
    let address = db::addresses::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| address_not_found(id))?;
    Ok(Json(address))
}

/// DELETE /api/addresses/{id}
///
/// Addresses referenced by an order cannot be deleted.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    owned_address(&state.pool, &user, id).await?;
    let deleted = db::addresses::delete(&state.pool, id).await.map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_foreign_key_violation()
        {
            return ServiceError::App(AppError::with_message(
                ErrorCode::InvalidRequest,
                "Address is used by existing orders",
            ));
        }
        ServiceError::from(e)
    })?;
    if !deleted {
        return Err(address_not_found(id).into());
    }
    tracing::info!(address_id = id, "Address deleted");
    Ok(Json(ApiResponse::message("Address deleted successfully")))
}
