//! Ownership checks layered on top of the role gateways

use shared::error::{AppError, ErrorCode};
use shared::models::{Order, Role};
use sqlx::SqlitePool;

use super::CurrentUser;
use crate::db;
use crate::error::ServiceResult;

/// The caller acts on their own user id (admins may act on anyone)
pub fn ensure_self(user: &CurrentUser, user_id: i64) -> Result<(), AppError> {
    if user.is_admin() || user.id == user_id {
        Ok(())
    } else {
        Err(AppError::permission_denied(
            "Cannot access another user's resources",
        ))
    }
}

/// The caller owns the retailer (admins may act on any retailer)
pub async fn ensure_retailer_owner(
    pool: &SqlitePool,
    user: &CurrentUser,
    retailer_id: i64,
) -> ServiceResult<()> {
    let retailer = db::retailers::find_by_id(pool, retailer_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RetailerNotFound))?;

    if user.is_admin() || retailer.user_id == user.id {
        Ok(())
    } else {
        Err(AppError::permission_denied("Not the owner of this retailer").into())
    }
}

/// Customers see their own orders, retailers the orders placed with them
pub async fn ensure_order_visible(
    pool: &SqlitePool,
    user: &CurrentUser,
    order: &Order,
) -> ServiceResult<()> {
    match user.role {
        Role::Admin => Ok(()),
        Role::Customer => Ok(ensure_self(user, order.customer_id)?),
        Role::Retailer => ensure_retailer_owner(pool, user, order.retailer_id).await,
    }
}
