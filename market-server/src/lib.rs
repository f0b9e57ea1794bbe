//! Smart Market - multi-retailer marketplace backend
//!
//! # Module layout
//!
//! ```text
//! market-server/src/
//! ├── api/          # HTTP routes and handlers
//! ├── auth/         # JWT, argon2 passwords, role gateways, rate limits
//! ├── db/           # SQLite pool, migrations, queries, seeding
//! ├── orders/       # placement transaction, status transitions, money
//! ├── services/     # accounts, catalog, inventory, retailer lifecycle, insights
//! ├── notify/       # chat and email sinks (best-effort)
//! └── middleware/   # request logging
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod middleware;
pub mod notify;
pub mod orders;
pub mod server;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use logger::init_logger;
pub use state::AppState;
