//! Application state shared by all handlers

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::{JwtService, RateLimiter};
use crate::config::Config;
use crate::db::DbService;
use crate::error::BoxError;
use crate::notify::Notifier;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub jwt: JwtService,
    pub notifier: Notifier,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Open the database and build the notification sinks from configuration
    pub async fn new(config: Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_url).await?;
        let notifier = Notifier::from_config(&config)?;
        Ok(Self::with_parts(config, db.pool, notifier))
    }

    pub fn with_parts(config: Config, pool: SqlitePool, notifier: Notifier) -> Self {
        Self {
            jwt: JwtService::new(&config.jwt_secret, config.jwt_expiry_hours),
            rate_limiter: RateLimiter::new(config.login_rate_limit, config.register_rate_limit),
            config: Arc::new(config),
            pool,
            notifier,
        }
    }
}
