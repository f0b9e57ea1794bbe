//! In-app notification Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: i64,
    pub retailer_id: i64,
    pub user_id: Option<i64>,
    pub order_id: Option<i64>,
    pub message: String,
    pub is_read: bool,
    /// UTC epoch millis
    pub timestamp: i64,
}
