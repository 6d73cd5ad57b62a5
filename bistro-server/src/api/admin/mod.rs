//! Admin API - business and user administration (admin role only)

mod handler;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/businesses",
            get(handler::list_businesses).post(handler::create_business),
        )
        .route("/businesses/{id}", get(handler::get_business))
        .route("/businesses/{id}/status", put(handler::update_business_status))
        .route("/users", get(handler::list_users).post(handler::create_user))
        .route("/users/{id}", delete(handler::delete_user))
}
