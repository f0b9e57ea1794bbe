//! HTTP API
//!
//! | Prefix | Module | Gateway |
//! |--------|--------|---------|
//! | /health | [`health`] | public |
//! | /customer | [`customer`] | public (register, login, catalog) |
//! | /retailer | [`retailer`] | public login/register, retailer otherwise |
//! | /admin | [`admin`] | public login, admin otherwise |
//! | /api/orders | [`orders`] | customer or retailer per route |
//! | /api/addresses | [`addresses`] | customer |
//! | /api/products | [`products`] | public reads, retailer writes |
//! | /api/notifications | [`notifications`] | retailer |
//! | /api/copilot | [`copilot`] | retailer |
//!
//! Admins pass every role gateway.

pub mod addresses;
pub mod admin;
pub mod copilot;
pub mod customer;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod retailer;

use axum::{Json, Router, middleware as axum_middleware};
use http::{HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{require_admin, require_auth, require_customer, require_retailer};
use crate::error::ServiceError;
use crate::middleware::logging_middleware;
use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, ServiceError>;

/// Which role gateway protects a group of routes
#[derive(Debug, Clone, Copy)]
pub enum Gateway {
    /// Any valid token
    Authenticated,
    Customer,
    Retailer,
    Admin,
}

/// Put `routes` behind token validation plus the role check.
///
/// `route_layer` keeps unmatched paths returning 404 instead of 401.
pub fn protect(routes: Router<AppState>, state: &AppState, gateway: Gateway) -> Router<AppState> {
    let routes = match gateway {
        Gateway::Authenticated => routes,
        Gateway::Customer => routes.route_layer(axum_middleware::from_fn(require_customer)),
        Gateway::Retailer => routes.route_layer(axum_middleware::from_fn(require_retailer)),
        Gateway::Admin => routes.route_layer(axum_middleware::from_fn(require_admin)),
    };
    routes.route_layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
}

/// All routes, no global middleware
pub fn build_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(customer::router(state))
        .merge(retailer::router(state))
        .merge(admin::router(state))
        .merge(orders::router(state))
        .merge(addresses::router(state))
        .merge(products::router(state))
        .merge(notifications::router(state))
        .merge(copilot::router(state))
}

/// Fully configured application, used by the server and by router tests
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    build_router(&state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(logging_middleware))
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}
