//! Retailer lifecycle, driven by admins
//!
//! `pending -> active | rejected` on the owning user; `blocked` is a separate
//! one-way flag on the retailer.

use shared::error::{AppError, ErrorCode};
use shared::models::{RetailerAccount, UserStatus};
use sqlx::SqlitePool;

use crate::db;
use crate::error::ServiceResult;
use crate::notify::{Notifier, messages};

async fn find_account(pool: &SqlitePool, retailer_id: i64) -> ServiceResult<RetailerAccount> {
    db::retailers::find_account(pool, retailer_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::RetailerNotFound)
                .with_detail("retailer_id", retailer_id)
                .into()
        })
}

async fn decide(
    pool: &SqlitePool,
    retailer_id: i64,
    outcome: UserStatus,
) -> ServiceResult<RetailerAccount> {
    let account = find_account(pool, retailer_id).await?;
    let moved =
        db::users::transition_status(pool, account.user_id, UserStatus::Pending, outcome).await?;
    if !moved {
        return Err(AppError::with_message(
            ErrorCode::RetailerNotPending,
            format!("Retailer {} is {}", account.username, account.status.as_str()),
        )
        .into());
    }
    tracing::info!(
        retailer_id = retailer_id,
        username = %account.username,
        status = outcome.as_str(),
        "Retailer registration decided"
    );
    find_account(pool, retailer_id).await
}

pub async fn approve(
    pool: &SqlitePool,
    notifier: &Notifier,
    retailer_id: i64,
) -> ServiceResult<RetailerAccount> {
    let account = decide(pool, retailer_id, UserStatus::Active).await?;
    let (subject, body) = messages::approval_email(&account.username);
    notifier.email(&account.email, &subject, &body).await;
    notifier.chat(&messages::retailer_approved(&account.username)).await;
    Ok(account)
}

pub async fn reject(
    pool: &SqlitePool,
    notifier: &Notifier,
    retailer_id: i64,
) -> ServiceResult<RetailerAccount> {
    let account = decide(pool, retailer_id, UserStatus::Rejected).await?;
    let (subject, body) = messages::rejection_email(&account.username);
    notifier.email(&account.email, &subject, &body).await;
    notifier.chat(&messages::retailer_rejected(&account.username)).await;
    Ok(account)
}

/// Hide the retailer from the catalog and refuse its logins and new orders.
/// Only active retailers can be blocked; blocking an already blocked
/// retailer changes nothing.
pub async fn block(
    pool: &SqlitePool,
    notifier: &Notifier,
    retailer_id: i64,
) -> ServiceResult<RetailerAccount> {
    let account = find_account(pool, retailer_id).await?;
    if account.status != UserStatus::Active {
        return Err(AppError::with_message(
            ErrorCode::RetailerNotActive,
            format!("Retailer {} is {}", account.username, account.status.as_str()),
        )
        .into());
    }
    if db::retailers::set_blocked(pool, retailer_id).await? {
        let account = find_account(pool, retailer_id).await?;
        tracing::info!(retailer_id = retailer_id, name = %account.name, "Retailer blocked");
        notifier.chat(&messages::retailer_blocked(&account.name)).await;
        Ok(account)
    } else {
        tracing::debug!(retailer_id = retailer_id, "Retailer already blocked");
        find_account(pool, retailer_id).await
    }
}
