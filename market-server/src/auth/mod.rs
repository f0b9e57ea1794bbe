//! Authentication and authorization

pub mod access;
mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod rate_limit;

pub use jwt::{Claims, CurrentUser, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_customer, require_retailer};
pub use rate_limit::RateLimiter;
