//! Manager API - staff, menu and tables of the resolved business

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/manager", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handler::list_users).post(handler::create_user))
        .route("/menu", get(handler::menu))
        .route("/menu/categories", post(handler::create_category))
        .route("/menu/items", post(handler::create_item))
        .route("/menu/items/{id}", put(handler::update_item))
        .route("/tables", post(handler::create_table))
}
