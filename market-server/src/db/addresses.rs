use shared::models::{Address, AddressCreate, AddressUpdate};
use sqlx::SqlitePool;

const ADDRESS_SELECT: &str = "SELECT id, user_id, address_line1, address_line2, city, state, pincode, is_default FROM addresses";

pub async fn create(pool: &SqlitePool, data: &AddressCreate) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO addresses (user_id, address_line1, address_line2, city, state, pincode, is_default)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(data.user_id)
    .bind(&data.address_line1)
    .bind(&data.address_line2)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.pincode)
    .bind(data.is_default)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Address>, sqlx::Error> {
    sqlx::query_as::<_, Address>(&format!("{ADDRESS_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Address>, sqlx::Error> {
    sqlx::query_as::<_, Address>(&format!(
        "{ADDRESS_SELECT} WHERE user_id = ? ORDER BY is_default DESC, id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn update(pool: &SqlitePool, id: i64, data: &AddressUpdate) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE addresses SET address_line1 = COALESCE(?1, address_line1), address_line2 = COALESCE(?2, address_line2), city = COALESCE(?3, city), state = COALESCE(?4, state), pincode = COALESCE(?5, pincode), is_default = COALESCE(?6, is_default) WHERE id = ?7",
    )
    .bind(&data.address_line1)
    .bind(&data.address_line2)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.pincode)
    .bind(data.is_default)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM addresses WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
