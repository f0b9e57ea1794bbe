//! Order status and payment status changes

use shared::error::{AppError, ErrorCode};
use shared::models::{OrderDetail, OrderStatus, PaymentStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::db;
use crate::error::ServiceResult;
use crate::notify::{Notifier, messages};

/// Move an order to `next`.
///
/// The transition is checked against the current status, then applied as a
/// compare-and-set so two concurrent updates cannot both succeed from the
/// same starting point. Cancelling returns the ordered units to stock.
pub async fn update_status(
    pool: &SqlitePool,
    notifier: &Notifier,
    order_id: i64,
    next: OrderStatus,
) -> ServiceResult<OrderDetail> {
    let current = db::orders::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id))?;

    if !current.status.can_transition_to(next) {
        return Err(transition_error(current.status, next).into());
    }

    let items = if next == OrderStatus::Cancelled {
        db::orders::items_for_order(pool, order_id).await?
    } else {
        Vec::new()
    };

    let delivered_at = (next == OrderStatus::Delivered).then(now_millis);

    let mut tx = pool.begin().await?;
    let moved =
        db::orders::update_status(&mut *tx, order_id, current.status, next, delivered_at).await?;
    if !moved {
        // Someone else changed the status after our read
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Order {} was modified concurrently", current.order_number),
        )
        .into());
    }

    for item in &items {
        if let Some(product_id) = item.product_id {
            db::products::restock(&mut *tx, product_id, item.quantity).await?;
        }
    }
    tx.commit().await?;

    tracing::info!(
        order_id = order_id,
        from = %current.status,
        to = %next,
        restocked_lines = items.len(),
        "Order status updated"
    );

    let detail = super::get_order(pool, order_id).await?;

    if let Err(e) = db::notifications::create(
        pool,
        detail.order.retailer_id,
        Some(detail.order.customer_id),
        Some(order_id),
        &messages::status_notice(&detail.order),
        now_millis(),
    )
    .await
    {
        tracing::warn!(order_id = order_id, error = %e, "Failed to store status notification");
    }
    notifier.chat(&messages::status_changed(&detail.order)).await;

    Ok(detail)
}

/// Payment status is independent of fulfillment; any value may follow any other.
pub async fn update_payment_status(
    pool: &SqlitePool,
    order_id: i64,
    status: PaymentStatus,
) -> ServiceResult<OrderDetail> {
    if !db::orders::update_payment_status(pool, order_id, status).await? {
        return Err(AppError::new(ErrorCode::OrderNotFound)
            .with_detail("order_id", order_id)
            .into());
    }
    tracing::info!(order_id = order_id, payment_status = %status, "Payment status updated");
    super::get_order(pool, order_id).await
}

fn transition_error(from: OrderStatus, to: OrderStatus) -> AppError {
    let allowed: Vec<&str> = from.allowed_transitions().iter().map(|s| s.as_str()).collect();
    AppError::with_message(
        ErrorCode::InvalidStatusTransition,
        format!("Cannot change order status from {from} to {to}"),
    )
    .with_detail("from", from.as_str())
    .with_detail("to", to.as_str())
    .with_detail("allowed", allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_error_lists_allowed() {
        let err = transition_error(OrderStatus::Placed, OrderStatus::Shipped);
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        let details = err.details.expect("details");
        assert_eq!(details["from"], "placed");
        assert_eq!(details["allowed"], serde_json::json!(["confirmed", "cancelled"]));
    }

    #[test]
    fn test_terminal_transition_error_has_empty_allowed() {
        let err = transition_error(OrderStatus::Delivered, OrderStatus::Cancelled);
        let details = err.details.expect("details");
        assert_eq!(details["allowed"], serde_json::json!([]));
    }
}
