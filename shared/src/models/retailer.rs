//! Retailer Model

use serde::{Deserialize, Serialize};

use super::user::UserStatus;

/// Retailer entity, owned by one retailer-role user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Retailer {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// City the retailer serves
    pub location: String,
    pub deliverable: bool,
    pub is_blocked: bool,
}

/// Catalog listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RetailerSummary {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub deliverable: bool,
}

/// Admin view: retailer joined with its owning account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RetailerAccount {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub location: String,
    pub deliverable: bool,
    pub is_blocked: bool,
    pub username: String,
    pub email: String,
    pub status: UserStatus,
}
