//! Customer accounts and catalog browsing (public)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let register = Router::new()
        .route("/customer/register", post(handler::register))
        .route_layer(middleware::from_fn_with_state(state.clone(), register_rate_limit));

    let login = Router::new()
        .route("/customer/login", post(handler::login))
        .route_layer(middleware::from_fn_with_state(state.clone(), login_rate_limit));

    let catalog = Router::new()
        .route("/customer/cities", get(handler::cities))
        .route("/customer/retailers/{city}", get(handler::retailers))
        .route("/customer/products/{retailer_id}", get(handler::products));

    register.merge(login).merge(catalog)
}
