//! Order placement
//!
//! One transaction: reserve stock line by line, price every line from the
//! catalog, write the order and its items, commit. Any failure drops the
//! transaction, which rolls back every reservation made so far.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Order, OrderDetail, OrderItem, OrderItemRequest, OrderStatus, PaymentStatus, PlaceOrderRequest,
    PlaceOrderResponse, UserStatus,
};
use shared::util::now_millis;
use sqlx::{Sqlite, SqlitePool, Transaction};

use super::generate_order_number;
use super::money::{MAX_QUANTITY, line_total, prices_match, to_f64};
use crate::db;
use crate::db::orders::NewOrder;
use crate::error::{ServiceError, ServiceResult};
use crate::notify::{Notifier, messages};

const ORDER_NUMBER_ATTEMPTS: usize = 3;

/// A reserved line, priced from the catalog
struct PricedLine {
    product_id: i64,
    name: String,
    quantity: i64,
    price: f64,
}

pub async fn place_order(
    pool: &SqlitePool,
    notifier: &Notifier,
    req: PlaceOrderRequest,
) -> ServiceResult<PlaceOrderResponse> {
    validate_items(&req.order_items)?;
    check_parties(pool, &req).await?;

    let mut tx = pool.begin().await?;

    let mut lines = Vec::with_capacity(req.order_items.len());
    let mut total = Decimal::ZERO;
    for item in &req.order_items {
        let line = reserve_line(&mut tx, req.retailer_id, item).await?;
        total += line_total(line.price, line.quantity);
        lines.push(line);
    }

    let now = now_millis();
    let (order_id, order_number) = insert_order(&mut tx, &req, to_f64(total), now).await?;

    for line in &lines {
        db::orders::insert_item(
            &mut *tx,
            order_id,
            line.product_id,
            &line.name,
            line.quantity,
            line.price,
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        order_id = order_id,
        order_number = %order_number,
        customer_id = req.customer_id,
        retailer_id = req.retailer_id,
        total = %to_f64(total),
        "Order placed"
    );

    let order = match super::get_order(pool, order_id).await {
        Ok(order) => order,
        Err(e) => {
            tracing::warn!(
                order_id = order_id,
                error = ?e,
                "Re-reading placed order failed, answering from memory"
            );
            let placed = Order {
                id: order_id,
                customer_id: req.customer_id,
                retailer_id: req.retailer_id,
                address_id: req.address_id,
                order_number,
                total_price: to_f64(total),
                status: OrderStatus::Placed,
                payment_status: PaymentStatus::Pending,
                order_date: now,
                delivery_timestamp: None,
            };
            committed_detail(placed, lines)
        }
    };
    announce(pool, notifier, &order).await;

    Ok(PlaceOrderResponse {
        order,
        message: "Order created successfully and inventory updated".to_string(),
    })
}

/// Order detail built from what the transaction wrote
fn committed_detail(order: Order, lines: Vec<PricedLine>) -> OrderDetail {
    let items = lines
        .into_iter()
        .map(|line| OrderItem {
            id: 0,
            order_id: order.id,
            product_id: Some(line.product_id),
            product_name: line.name,
            quantity: line.quantity,
            price: line.price,
        })
        .collect();
    OrderDetail {
        order,
        items,
        address: None,
        customer_username: None,
    }
}

fn validate_items(items: &[OrderItemRequest]) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for item in items {
        if item.quantity <= 0 || item.quantity > MAX_QUANTITY {
            return Err(AppError::with_message(
                ErrorCode::ProductInvalidQuantity,
                format!(
                    "Quantity for product {} must be between 1 and {}, got {}",
                    item.product_id, MAX_QUANTITY, item.quantity
                ),
            ));
        }
        if let Some(price) = item.price
            && (!price.is_finite() || price < 0.0)
        {
            return Err(AppError::validation(format!(
                "Invalid price for product {}: {}",
                item.product_id, price
            )));
        }
    }
    Ok(())
}

/// Customer, retailer and address must exist and fit together.
/// Runs before the transaction opens.
async fn check_parties(pool: &SqlitePool, req: &PlaceOrderRequest) -> ServiceResult<()> {
    db::users::find_by_id(pool, req.customer_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("customer_id", req.customer_id))?;

    let retailer = db::retailers::find_account(pool, req.retailer_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::RetailerNotFound).with_detail("retailer_id", req.retailer_id)
        })?;
    if retailer.is_blocked {
        return Err(AppError::with_message(
            ErrorCode::RetailerBlocked,
            format!("Retailer {} is not accepting orders", retailer.name),
        )
        .into());
    }
    if retailer.status != UserStatus::Active {
        return Err(AppError::with_message(
            ErrorCode::AccountDisabled,
            format!("Retailer {} is not accepting orders", retailer.name),
        )
        .with_detail("retailer_id", req.retailer_id)
        .into());
    }

    let address = db::addresses::find_by_id(pool, req.address_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AddressNotFound).with_detail("address_id", req.address_id))?;
    if address.user_id != req.customer_id {
        return Err(AppError::permission_denied("Address belongs to another user").into());
    }
    Ok(())
}

/// Decrement stock for one line, then check the product against the order.
///
/// The write comes first so the transaction holds the write lock before it
/// reads anything it depends on.
async fn reserve_line(
    tx: &mut Transaction<'_, Sqlite>,
    retailer_id: i64,
    item: &OrderItemRequest,
) -> ServiceResult<PricedLine> {
    let reserved = db::products::try_reserve(&mut **tx, item.product_id, item.quantity).await?;

    let product = db::products::find_by_id(&mut **tx, item.product_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", item.product_id),
            )
            .with_detail("product_id", item.product_id)
        })?;

    if product.retailer_id != retailer_id {
        return Err(AppError::with_message(
            ErrorCode::ProductRetailerMismatch,
            format!("Product {} is not sold by retailer {}", product.name, retailer_id),
        )
        .into());
    }

    if !reserved {
        return Err(AppError::insufficient_stock(&product.name, product.quantity, item.quantity).into());
    }

    let Some(price) = product.price else {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("Product {} is not available for sale", product.name),
        )
        .into());
    };

    if let Some(submitted) = item.price
        && !prices_match(submitted, price)
    {
        return Err(AppError::with_message(
            ErrorCode::PriceMismatch,
            format!(
                "Price for {} changed: catalog {}, submitted {}",
                product.name, price, submitted
            ),
        )
        .with_detail("product_id", product.id)
        .with_detail("catalog_price", price)
        .with_detail("submitted_price", submitted)
        .into());
    }

    Ok(PricedLine {
        product_id: product.id,
        name: product.name,
        quantity: item.quantity,
        price,
    })
}

/// Insert the order row, drawing a fresh number on the rare collision
async fn insert_order(
    tx: &mut Transaction<'_, Sqlite>,
    req: &PlaceOrderRequest,
    total_price: f64,
    now: i64,
) -> ServiceResult<(i64, String)> {
    let mut last_err = None;
    for _ in 0..ORDER_NUMBER_ATTEMPTS {
        let order_number = generate_order_number();
        let new_order = NewOrder {
            customer_id: req.customer_id,
            retailer_id: req.retailer_id,
            address_id: req.address_id,
            order_number: &order_number,
            total_price,
            order_date: now,
        };
        match db::orders::insert_order(&mut **tx, &new_order).await {
            Ok(id) => return Ok((id, order_number)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::warn!(order_number = %order_number, "Order number collision, retrying");
                last_err = Some(sqlx::Error::Database(e));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(last_err
        .map(ServiceError::from)
        .unwrap_or_else(|| AppError::internal("Could not allocate an order number").into()))
}

/// Post-commit side effects. Failures are logged only.
async fn announce(pool: &SqlitePool, notifier: &Notifier, detail: &OrderDetail) {
    let order: &Order = &detail.order;
    let items: &[OrderItem] = &detail.items;

    if let Err(e) = db::notifications::create(
        pool,
        order.retailer_id,
        Some(order.customer_id),
        Some(order.id),
        &messages::order_placed_notice(order, items),
        now_millis(),
    )
    .await
    {
        tracing::warn!(order_id = order.id, error = %e, "Failed to store order notification");
    }

    notifier
        .chat(&messages::order_placed(order, items, detail.address.as_ref()))
        .await;

    match db::users::find_by_id(pool, order.customer_id).await {
        Ok(Some(customer)) => {
            let (subject, body) = messages::order_email_customer(order, items);
            notifier.email(&customer.email, &subject, &body).await;
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Customer lookup for email failed"),
    }

    match db::retailers::find_account(pool, order.retailer_id).await {
        Ok(Some(account)) => {
            let (subject, body) = messages::order_email_retailer(order, items);
            notifier.email(&account.email, &subject, &body).await;
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Retailer lookup for email failed"),
    }
}
