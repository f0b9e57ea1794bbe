//! Application-layer rate limiting for login and registration routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::state::AppState;

struct IpEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Clone)]
pub struct RateLimiter {
    /// route name -> (IP -> entry)
    inner: Arc<Mutex<HashMap<&'static str, HashMap<String, IpEntry>>>>,
    /// Per-minute limits; 0 disables the check
    login_per_minute: u32,
    register_per_minute: u32,
}

impl RateLimiter {
    pub fn new(login_per_minute: u32, register_per_minute: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            login_per_minute,
            register_per_minute,
        }
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    async fn check(&self, route: &'static str, ip: &str, max_requests: u32, window_secs: u64) -> bool {
        if max_requests == 0 {
            return true;
        }

        let mut map = self.inner.lock().await;
        let route_map = map.entry(route).or_default();
        let now = Instant::now();

        let entry = route_map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start).as_secs() >= window_secs {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= max_requests
    }

    /// Remove entries older than 5 minutes
    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let cutoff = std::time::Duration::from_secs(300);
        let now = Instant::now();

        for route_map in map.values_mut() {
            route_map.retain(|_, entry| now.duration_since(entry.window_start) < cutoff);
        }
        map.retain(|_, route_map| !route_map.is_empty());
    }
}

/// Client IP: X-Forwarded-For first, then the peer address.
fn extract_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

fn too_many_requests() -> Response {
    let mut response =
        AppError::with_message(ErrorCode::InvalidRequest, "Too many requests, try again later")
            .into_response();
    *response.status_mut() = http::StatusCode::TOO_MANY_REQUESTS;
    response
}

pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let limiter = &state.rate_limiter;
    let ip = extract_ip(&request);
    if !limiter.check("login", &ip, limiter.login_per_minute, 60).await {
        tracing::warn!(ip = %ip, "Login rate limit exceeded");
        return Err(too_many_requests());
    }
    Ok(next.run(request).await)
}

pub async fn register_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let limiter = &state.rate_limiter;
    let ip = extract_ip(&request);
    if !limiter.check("register", &ip, limiter.register_per_minute, 60).await {
        tracing::warn!(ip = %ip, "Registration rate limit exceeded");
        return Err(too_many_requests());
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_within_window() {
        let limiter = RateLimiter::new(2, 0);
        assert!(limiter.check("login", "1.2.3.4", 2, 60).await);
        assert!(limiter.check("login", "1.2.3.4", 2, 60).await);
        assert!(!limiter.check("login", "1.2.3.4", 2, 60).await);
        // Other IPs are tracked separately
        assert!(limiter.check("login", "5.6.7.8", 2, 60).await);
    }

    #[tokio::test]
    async fn test_zero_disables() {
        let limiter = RateLimiter::new(0, 0);
        for _ in 0..50 {
            assert!(limiter.check("register", "1.2.3.4", 0, 60).await);
        }
    }

    #[tokio::test]
    async fn test_cleanup_keeps_fresh_entries() {
        let limiter = RateLimiter::new(5, 5);
        limiter.check("login", "1.2.3.4", 5, 60).await;
        limiter.cleanup().await;
        assert_eq!(limiter.inner.lock().await.len(), 1);
    }
}
