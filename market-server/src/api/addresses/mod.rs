//! Delivery addresses (customer gateway, owner only)

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use super::{Gateway, protect};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/api/addresses", post(handler::create))
        .route("/api/addresses/", post(handler::create))
        .route("/api/addresses/user/{user_id}", get(handler::list_for_user))
        .route("/api/addresses/{id}", put(handler::update).delete(handler::delete));

    protect(routes, state, Gateway::Customer)
}
