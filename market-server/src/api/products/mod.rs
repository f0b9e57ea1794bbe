//! Product API: public reads, retailer-owned writes

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use super::{Gateway, protect};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/products", get(handler::list))
        .route("/api/products/", get(handler::list))
        .route("/api/products/retailer/{retailer_id}", get(handler::list_by_retailer));

    let write = Router::new()
        .route("/api/products", post(handler::create))
        .route("/api/products/", post(handler::create))
        .route("/api/products/{id}", put(handler::update).delete(handler::delete));

    public.merge(protect(write, state, Gateway::Retailer))
}
