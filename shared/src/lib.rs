//! Shared types for the Smart Market backend
//!
//! Error codes, API response envelope and domain models used by the
//! server and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
