use shared::models::{Retailer, RetailerAccount, RetailerSummary};
use sqlx::{SqliteExecutor, SqlitePool};

const RETAILER_SELECT: &str =
    "SELECT id, user_id, name, location, deliverable, is_blocked FROM retailers";

const ACCOUNT_SELECT: &str = "SELECT r.id, r.user_id, r.name, r.location, r.deliverable, r.is_blocked, u.username, u.email, u.status FROM retailers r JOIN users u ON r.user_id = u.id";

pub async fn create(
    exec: impl SqliteExecutor<'_>,
    user_id: i64,
    name: &str,
    location: &str,
    deliverable: bool,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO retailers (user_id, name, location, deliverable, is_blocked)
         VALUES (?, ?, ?, ?, 0)",
    )
    .bind(user_id)
    .bind(name)
    .bind(location)
    .bind(deliverable)
    .execute(exec)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(
    exec: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Retailer>, sqlx::Error> {
    sqlx::query_as::<_, Retailer>(&format!("{RETAILER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(exec)
        .await
}

pub async fn find_by_user_id(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Option<Retailer>, sqlx::Error> {
    sqlx::query_as::<_, Retailer>(&format!("{RETAILER_SELECT} WHERE user_id = ? ORDER BY id LIMIT 1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Distinct cities served by active, non-blocked retailers
pub async fn list_cities(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT DISTINCT r.location FROM retailers r JOIN users u ON r.user_id = u.id
         WHERE r.is_blocked = 0 AND u.status = 'active' ORDER BY r.location",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_by_city(
    pool: &SqlitePool,
    city: &str,
) -> Result<Vec<RetailerSummary>, sqlx::Error> {
    sqlx::query_as(
        "SELECT r.id, r.name, r.location, r.deliverable FROM retailers r
         JOIN users u ON r.user_id = u.id
         WHERE r.location = ? AND r.is_blocked = 0 AND u.status = 'active' ORDER BY r.name",
    )
    .bind(city)
    .fetch_all(pool)
    .await
}

pub async fn list_accounts(pool: &SqlitePool) -> Result<Vec<RetailerAccount>, sqlx::Error> {
    sqlx::query_as::<_, RetailerAccount>(&format!("{ACCOUNT_SELECT} ORDER BY r.id"))
        .fetch_all(pool)
        .await
}

pub async fn list_pending_accounts(
    pool: &SqlitePool,
) -> Result<Vec<RetailerAccount>, sqlx::Error> {
    sqlx::query_as::<_, RetailerAccount>(&format!(
        "{ACCOUNT_SELECT} WHERE u.status = 'pending' ORDER BY r.id"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_account(
    exec: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<RetailerAccount>, sqlx::Error> {
    sqlx::query_as::<_, RetailerAccount>(&format!("{ACCOUNT_SELECT} WHERE r.id = ?"))
        .bind(id)
        .fetch_optional(exec)
        .await
}

/// Returns false if the retailer was already blocked (or does not exist)
pub async fn set_blocked(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE retailers SET is_blocked = 1 WHERE id = ? AND is_blocked = 0")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
