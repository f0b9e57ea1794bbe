use shared::models::{Order, OrderItem, OrderStatus, PaymentStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

const ORDER_SELECT: &str = "SELECT id, customer_id, retailer_id, address_id, order_number, total_price, status, payment_status, order_date, delivery_timestamp FROM orders";

const ITEM_SELECT: &str =
    "SELECT id, order_id, product_id, product_name, quantity, price FROM order_items";

/// Order row joined with the customer's username
#[derive(sqlx::FromRow)]
pub struct OrderWithCustomer {
    #[sqlx(flatten)]
    pub order: Order,
    pub customer_username: String,
}

pub struct NewOrder<'a> {
    pub customer_id: i64,
    pub retailer_id: i64,
    pub address_id: i64,
    pub order_number: &'a str,
    pub total_price: f64,
    pub order_date: i64,
}

pub async fn insert_order(
    exec: impl SqliteExecutor<'_>,
    order: &NewOrder<'_>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO orders (customer_id, retailer_id, address_id, order_number, total_price, status, payment_status, order_date)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.customer_id)
    .bind(order.retailer_id)
    .bind(order.address_id)
    .bind(order.order_number)
    .bind(order.total_price)
    .bind(OrderStatus::Placed)
    .bind(PaymentStatus::Pending)
    .bind(order.order_date)
    .execute(exec)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_item(
    exec: impl SqliteExecutor<'_>,
    order_id: i64,
    product_id: i64,
    product_name: &str,
    quantity: i64,
    price: f64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO order_items (order_id, product_id, product_name, quantity, price) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(product_name)
    .bind(quantity)
    .bind(price)
    .execute(exec)
    .await?;
    Ok(())
}

pub async fn find_by_id(
    exec: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!("{ORDER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(exec)
        .await
}

pub async fn items_for_order(
    exec: impl SqliteExecutor<'_>,
    order_id: i64,
) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(&format!("{ITEM_SELECT} WHERE order_id = ? ORDER BY id"))
        .bind(order_id)
        .fetch_all(exec)
        .await
}

/// Items for several orders in one round trip
pub async fn items_for_orders(
    pool: &SqlitePool,
    order_ids: &[i64],
) -> Result<Vec<OrderItem>, sqlx::Error> {
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb = QueryBuilder::<Sqlite>::new(ITEM_SELECT);
    qb.push(" WHERE order_id IN (");
    let mut separated = qb.separated(", ");
    for id in order_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY order_id, id");
    qb.build_query_as::<OrderItem>().fetch_all(pool).await
}

/// Newest first
pub async fn list_by_customer(pool: &SqlitePool, customer_id: i64) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "{ORDER_SELECT} WHERE customer_id = ? ORDER BY order_date DESC, id DESC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await
}

/// Newest first
pub async fn list_by_retailer(pool: &SqlitePool, retailer_id: i64) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "{ORDER_SELECT} WHERE retailer_id = ? ORDER BY order_date DESC, id DESC"
    ))
    .bind(retailer_id)
    .fetch_all(pool)
    .await
}

pub async fn list_all_with_customer(
    pool: &SqlitePool,
) -> Result<Vec<OrderWithCustomer>, sqlx::Error> {
    sqlx::query_as(
        "SELECT o.id, o.customer_id, o.retailer_id, o.address_id, o.order_number, o.total_price, o.status, o.payment_status, o.order_date, o.delivery_timestamp, u.username AS customer_username
         FROM orders o JOIN users u ON o.customer_id = u.id
         ORDER BY o.order_date DESC, o.id DESC",
    )
    .fetch_all(pool)
    .await
}

/// Compare-and-set on status. Returns false if the order moved in between.
///
/// `delivery_timestamp` is only written when `Some`.
pub async fn update_status(
    exec: impl SqliteExecutor<'_>,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
    delivery_timestamp: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE orders SET status = ?1, delivery_timestamp = COALESCE(?2, delivery_timestamp)
         WHERE id = ?3 AND status = ?4",
    )
    .bind(to)
    .bind(delivery_timestamp)
    .bind(id)
    .bind(from)
    .execute(exec)
    .await?;
    Ok(rows.rows_affected() == 1)
}

pub async fn update_payment_status(
    pool: &SqlitePool,
    id: i64,
    status: PaymentStatus,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE orders SET payment_status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
