//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Market server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (file is created if missing)
    pub database_url: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT signing secret
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Chat sink is enabled only when both token and chat id are set
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_api_base: String,
    /// Outbound notification request timeout
    pub notify_timeout_secs: u64,
    pub email_from: String,
    /// Admin bootstrap account (created at startup if no admin exists)
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub admin_email: Option<String>,
    pub seed_demo_data: bool,
    pub seed_retailer_password: String,
    pub cors_origins: Vec<String>,
    /// Requests per minute per IP; 0 disables
    pub login_rate_limit: u32,
    pub register_rate_limit: u32,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://market.db".into(),
            http_port: 8000,
            environment: "development".into(),
            jwt_secret: "dev-JWT_SECRET-not-for-production".into(),
            jwt_expiry_hours: 24,
            telegram_bot_token: None,
            telegram_chat_id: None,
            telegram_api_base: "https://api.telegram.org".into(),
            notify_timeout_secs: 5,
            email_from: "noreply@smartmarket.local".into(),
            admin_username: None,
            admin_password: None,
            admin_email: None,
            seed_demo_data: true,
            seed_retailer_password: "changeme123".into(),
            cors_origins: vec![
                "http://127.0.0.1:5500".into(),
                "http://localhost:5500".into(),
            ],
            login_rate_limit: 10,
            register_rate_limit: 5,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn optional(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|s| !s.trim().is_empty())
    }

    fn flag(name: &str, default: bool) -> bool {
        match std::env::var(name) {
            Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
            Err(_) => default,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let cors_origins = match Self::optional("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiry_hours: std::env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|h: &i64| *h > 0)
                .unwrap_or(defaults.jwt_expiry_hours),
            telegram_bot_token: Self::optional("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: Self::optional("TELEGRAM_CHAT_ID"),
            telegram_api_base: Self::optional("TELEGRAM_API_BASE")
                .unwrap_or(defaults.telegram_api_base),
            notify_timeout_secs: std::env::var("NOTIFY_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.notify_timeout_secs),
            email_from: Self::optional("EMAIL_FROM").unwrap_or(defaults.email_from),
            admin_username: Self::optional("ADMIN_USERNAME"),
            admin_password: Self::optional("ADMIN_PASSWORD"),
            admin_email: Self::optional("ADMIN_EMAIL"),
            seed_demo_data: Self::flag("SEED_DEMO_DATA", defaults.seed_demo_data),
            seed_retailer_password: Self::optional("SEED_RETAILER_PASSWORD")
                .unwrap_or(defaults.seed_retailer_password),
            cors_origins,
            login_rate_limit: std::env::var("LOGIN_RATE_LIMIT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.login_rate_limit),
            register_rate_limit: std::env::var("REGISTER_RATE_LIMIT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.register_rate_limit),
            log_level: Self::optional("LOG_LEVEL")
                .or_else(|| Self::optional("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            log_json: Self::flag("LOG_JSON", defaults.log_json),
            log_dir: Self::optional("LOG_DIR"),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.jwt_expiry_hours, 24);
        assert!(config.seed_demo_data);
        assert!(config.is_development());
        assert!(config.telegram_bot_token.is_none());
    }

    #[test]
    fn test_require_secret_dev_placeholder() {
        let val = Config::require_secret("MARKET_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(val, "dev-MARKET_TEST_UNSET_SECRET-not-for-production");
        assert!(Config::require_secret("MARKET_TEST_UNSET_SECRET", "production").is_err());
    }
}
