//! Admin console: account review and global read views

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::{Gateway, protect};
use crate::auth::rate_limit::login_rate_limit;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let login = Router::new()
        .route("/admin/login", post(handler::login))
        .route_layer(middleware::from_fn_with_state(state.clone(), login_rate_limit));

    let protected = Router::new()
        .route("/admin/users", get(handler::list_users))
        .route("/admin/retailers", get(handler::list_retailers))
        .route("/admin/pending-retailers", get(handler::list_pending_retailers))
        .route("/admin/products", get(handler::list_products))
        .route("/admin/orders", get(handler::list_orders))
        .route("/admin/approve-retailer/{id}", post(handler::approve_retailer))
        .route("/admin/reject-retailer/{id}", post(handler::reject_retailer))
        .route("/admin/block-retailer/{id}", post(handler::block_retailer))
        .route("/admin/orders/{order_id}/approve", post(handler::approve_order));

    login.merge(protect(protected, state, Gateway::Admin))
}
