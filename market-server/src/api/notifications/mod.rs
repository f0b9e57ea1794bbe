//! In-app notifications for retailers

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use super::{Gateway, protect};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/api/notifications/retailer/{retailer_id}", get(handler::list_for_retailer))
        .route("/api/notifications/{id}/read", put(handler::mark_read));

    protect(routes, state, Gateway::Retailer)
}
