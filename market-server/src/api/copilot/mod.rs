//! Retailer insights

mod handler;

use axum::{Router, routing::post};

use super::{Gateway, protect};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let routes = Router::new().route("/api/copilot/summary", post(handler::summary));
    protect(routes, state, Gateway::Retailer)
}
