//! Address Model

use serde::{Deserialize, Serialize};

/// Delivery address owned by one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub is_default: bool,
}

impl Address {
    /// Single-line form used in notifications: `line1, city, state - pincode`
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.address_line1, self.city, self.state, self.pincode
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressCreate {
    pub user_id: i64,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressUpdate {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub is_default: Option<bool>,
}
