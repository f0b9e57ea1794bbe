//! Business services behind the HTTP handlers

pub mod accounts;
pub mod catalog;
pub mod insights;
pub mod inventory;
pub mod retailers;
