//! Retailer accounts, inventory and fulfillment

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::{Gateway, protect};
use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let register = Router::new()
        .route("/retailer/register", post(handler::register))
        .route_layer(middleware::from_fn_with_state(state.clone(), register_rate_limit));

    let login = Router::new()
        .route("/retailer/login", post(handler::login))
        .route_layer(middleware::from_fn_with_state(state.clone(), login_rate_limit));

    let protected = Router::new()
        .route("/retailer/inventory/{retailer_id}", get(handler::list_inventory))
        .route("/retailer/inventory/update", put(handler::update_inventory))
        .route("/retailer/order/{order_id}/dispatch", put(handler::dispatch))
        .route("/retailer/order/{order_id}/deliver", put(handler::deliver));

    register
        .merge(login)
        .merge(protect(protected, state, Gateway::Retailer))
}
