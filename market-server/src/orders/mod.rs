//! Order workflow: placement, status transitions and read paths

pub mod money;
pub mod placement;
pub mod status;

use shared::error::{AppError, ErrorCode};
use shared::models::{Address, Order, OrderDetail, OrderItem};
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::db;
use crate::error::ServiceResult;

pub use placement::place_order;
pub use status::{update_payment_status, update_status};

/// `ORD-` followed by 8 uppercase hex characters
pub fn generate_order_number() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("ORD-{}", hex[..8].to_uppercase())
}

pub async fn get_order(pool: &SqlitePool, order_id: i64) -> ServiceResult<OrderDetail> {
    let order = db::orders::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id))?;
    let mut details = attach_details(pool, vec![order]).await?;
    details
        .pop()
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).into())
}

/// Newest first, with items and address
pub async fn list_for_customer(pool: &SqlitePool, customer_id: i64) -> ServiceResult<Vec<OrderDetail>> {
    let orders = db::orders::list_by_customer(pool, customer_id).await?;
    attach_details(pool, orders).await
}

/// Newest first, with items and address
pub async fn list_for_retailer(pool: &SqlitePool, retailer_id: i64) -> ServiceResult<Vec<OrderDetail>> {
    let orders = db::orders::list_by_retailer(pool, retailer_id).await?;
    attach_details(pool, orders).await
}

/// Admin view: every order with the customer's username
pub async fn list_all(pool: &SqlitePool) -> ServiceResult<Vec<OrderDetail>> {
    let rows = db::orders::list_all_with_customer(pool).await?;
    let usernames: HashMap<i64, String> = rows
        .iter()
        .map(|r| (r.order.id, r.customer_username.clone()))
        .collect();
    let mut details = attach_details(pool, rows.into_iter().map(|r| r.order).collect()).await?;
    for detail in &mut details {
        detail.customer_username = usernames.get(&detail.order.id).cloned();
    }
    Ok(details)
}

async fn attach_details(pool: &SqlitePool, orders: Vec<Order>) -> ServiceResult<Vec<OrderDetail>> {
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in db::orders::items_for_orders(pool, &ids).await? {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    let mut addresses: HashMap<i64, Option<Address>> = HashMap::new();
    for order in &orders {
        if !addresses.contains_key(&order.address_id) {
            let address = db::addresses::find_by_id(pool, order.address_id).await?;
            addresses.insert(order.address_id, address);
        }
    }

    Ok(orders
        .into_iter()
        .map(|order| OrderDetail {
            items: items_by_order.remove(&order.id).unwrap_or_default(),
            address: addresses.get(&order.address_id).cloned().flatten(),
            customer_username: None,
            order,
        })
        .collect())
}
