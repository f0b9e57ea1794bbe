//! Order API
//!
//! | Path | Method | Gateway |
//! |------|--------|---------|
//! | /api/orders/ | POST | customer |
//! | /api/orders/user/{user_id} | GET | customer |
//! | /api/orders/retailer/{retailer_id} | GET | retailer |
//! | /api/orders/{order_id}/status | PUT | retailer |
//! | /api/orders/{order_id}/payment | PUT | retailer |
//! | /api/orders/{order_id} | GET | any party to the order |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use super::{Gateway, protect};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let customer = Router::new()
        .route("/api/orders", post(handler::place))
        .route("/api/orders/", post(handler::place))
        .route("/api/orders/user/{user_id}", get(handler::list_for_user));

    let retailer = Router::new()
        .route("/api/orders/retailer/{retailer_id}", get(handler::list_for_retailer))
        .route("/api/orders/{order_id}/status", put(handler::update_status))
        .route("/api/orders/{order_id}/payment", put(handler::update_payment));

    let any = Router::new().route("/api/orders/{order_id}", get(handler::get_by_id));

    protect(customer, state, Gateway::Customer)
        .merge(protect(retailer, state, Gateway::Retailer))
        .merge(protect(any, state, Gateway::Authenticated))
}
