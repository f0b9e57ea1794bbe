use shared::models::Notification;
use sqlx::{SqliteExecutor, SqlitePool};

pub async fn create(
    exec: impl SqliteExecutor<'_>,
    retailer_id: i64,
    user_id: Option<i64>,
    order_id: Option<i64>,
    message: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO notifications (retailer_id, user_id, order_id, message, is_read, timestamp)
         VALUES (?, ?, ?, ?, 0, ?)",
    )
    .bind(retailer_id)
    .bind(user_id)
    .bind(order_id)
    .bind(message)
    .bind(now)
    .execute(exec)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Notification>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, retailer_id, user_id, order_id, message, is_read, timestamp FROM notifications WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Newest first
pub async fn list_by_retailer(
    pool: &SqlitePool,
    retailer_id: i64,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, retailer_id, user_id, order_id, message, is_read, timestamp FROM notifications
         WHERE retailer_id = ? ORDER BY timestamp DESC, id DESC",
    )
    .bind(retailer_id)
    .fetch_all(pool)
    .await
}

pub async fn mark_read(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
