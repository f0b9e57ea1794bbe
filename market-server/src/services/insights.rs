//! Rule-based retailer insights
//!
//! Computed on demand from the retailer's products and orders. No model, no
//! history: every suggestion comes from a fixed threshold below.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderStatus, Product};
use sqlx::SqlitePool;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::money::{format_money, to_decimal, to_f64};

const LOW_STOCK_BELOW: i64 = 50;
const LOW_STOCK_NAMES: usize = 3;
const BUSY_PENDING_ORDERS: usize = 5;
const STRONG_REVENUE: f64 = 5000.0;
const LOW_AVERAGE_PRICE: f64 = 50.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightSummary {
    pub summary: String,
    pub suggestions: Vec<String>,
}

pub async fn summarize(pool: &SqlitePool, retailer_id: i64) -> ServiceResult<InsightSummary> {
    let products = db::products::list_by_retailer(pool, retailer_id).await?;
    let orders = db::orders::list_by_retailer(pool, retailer_id).await?;
    Ok(build(&products, &orders))
}

fn build(products: &[Product], orders: &[Order]) -> InsightSummary {
    if products.is_empty() {
        return InsightSummary {
            summary: "No products found for this retailer.".to_string(),
            suggestions: Vec::new(),
        };
    }

    let total_stock: i64 = products.iter().map(|p| p.quantity).sum();
    let prices: Vec<f64> = products.iter().filter_map(|p| p.price).collect();
    let avg_price = if prices.is_empty() {
        0.0
    } else {
        let sum: Decimal = prices.iter().map(|p| to_decimal(*p)).sum();
        to_f64(sum / Decimal::from(prices.len()))
    };

    let low_stock: Vec<&str> = products
        .iter()
        .filter(|p| p.quantity < LOW_STOCK_BELOW)
        .map(|p| p.name.as_str())
        .collect();
    let top = products.iter().max_by_key(|p| p.quantity);

    let revenue = to_f64(
        orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| to_decimal(o.total_price))
            .sum(),
    );
    let pending = orders.iter().filter(|o| o.status == OrderStatus::Placed).count();
    let confirmed = orders.iter().filter(|o| o.status == OrderStatus::Confirmed).count();

    let mut suggestions = Vec::new();
    if !low_stock.is_empty() {
        let names: Vec<&str> = low_stock.iter().take(LOW_STOCK_NAMES).copied().collect();
        suggestions.push(format!("🔁 Restock low inventory items: {}...", names.join(", ")));
    }
    if let Some(top) = top {
        suggestions.push(format!("🏆 Promote top-selling item: {}, high demand!", top.name));
    }
    if pending > BUSY_PENDING_ORDERS {
        suggestions.push(format!("⚠️ {pending} orders pending, optimize delivery workflow."));
    }
    if revenue > STRONG_REVENUE {
        suggestions.push("💸 Strong sales trend, consider seasonal offers or combos.".to_string());
    }
    if avg_price < LOW_AVERAGE_PRICE {
        suggestions.push("📊 Average product price is low, try adding premium SKUs.".to_string());
    }
    if suggestions.is_empty() {
        suggestions.push("✅ Inventory and sales look stable. Keep monitoring trends weekly.".to_string());
    }

    InsightSummary {
        summary: format!(
            "📦 {} products ({} units) | 💰 Avg Price ₹{} | Orders: {} pending, {} confirmed | Revenue: ₹{}",
            products.len(),
            total_stock,
            format_money(avg_price),
            pending,
            confirmed,
            format_money(revenue)
        ),
        suggestions,
    }
}
