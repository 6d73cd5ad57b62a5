//! Kitchen API
//!
//! The preparing queue and the `preparing -> ready` hand-off.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/kitchen/orders", get(handler::list_preparing))
        .route("/api/kitchen/orders/{id}/status", put(handler::mark_ready))
}
