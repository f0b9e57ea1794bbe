//! Data models
//!
//! Shared between market-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod address;
pub mod notification;
pub mod order;
pub mod product;
pub mod retailer;
pub mod user;

// Re-exports
pub use address::*;
pub use notification::*;
pub use order::*;
pub use product::*;
pub use retailer::*;
pub use user::*;
