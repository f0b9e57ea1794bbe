use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::{SqliteExecutor, SqlitePool};

const PRODUCT_SELECT: &str =
    "SELECT id, retailer_id, name, price, quantity, category FROM products";

pub async fn find_by_id(
    exec: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(exec)
        .await
}

pub async fn find_by_retailer_and_name(
    pool: &SqlitePool,
    retailer_id: i64,
    name: &str,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!(
        "{PRODUCT_SELECT} WHERE retailer_id = ? AND name = ? ORDER BY id LIMIT 1"
    ))
    .bind(retailer_id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// Products a customer may see: priced and categorized
pub async fn list_visible_by_retailer(
    pool: &SqlitePool,
    retailer_id: i64,
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!(
        "{PRODUCT_SELECT} WHERE retailer_id = ? AND price IS NOT NULL AND category IS NOT NULL ORDER BY category, name"
    ))
    .bind(retailer_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_retailer(
    pool: &SqlitePool,
    retailer_id: i64,
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} WHERE retailer_id = ? ORDER BY id"))
        .bind(retailer_id)
        .fetch_all(pool)
        .await
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} ORDER BY id"))
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await
}

pub async fn create(
    exec: impl SqliteExecutor<'_>,
    data: &ProductCreate,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO products (retailer_id, name, price, quantity, category) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(data.retailer_id)
    .bind(&data.name)
    .bind(data.price)
    .bind(data.quantity)
    .bind(&data.category)
    .execute(exec)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &ProductUpdate,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE products SET name = COALESCE(?1, name), price = COALESCE(?2, price), quantity = COALESCE(?3, quantity), category = COALESCE(?4, category) WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(data.quantity)
    .bind(&data.category)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Take `quantity` units if at least that many are in stock.
///
/// The guarded UPDATE takes the database write lock, which is held until the
/// enclosing transaction ends. Returns false when the product is missing or
/// short.
pub async fn try_reserve(
    exec: impl SqliteExecutor<'_>,
    id: i64,
    quantity: i64,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE products SET quantity = quantity - ?1 WHERE id = ?2 AND quantity >= ?1",
    )
    .bind(quantity)
    .bind(id)
    .execute(exec)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Return units to stock (order cancellation)
pub async fn restock(
    exec: impl SqliteExecutor<'_>,
    id: i64,
    quantity: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE products SET quantity = quantity + ? WHERE id = ?")
        .bind(quantity)
        .bind(id)
        .execute(exec)
        .await?;
    Ok(())
}
