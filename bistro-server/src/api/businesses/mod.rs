//! Business listing and selection

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/businesses", get(handler::list))
        .route("/api/businesses/{id}/select", post(handler::select))
}
