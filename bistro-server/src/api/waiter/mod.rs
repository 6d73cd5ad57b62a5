//! Waiter API - orders, tables and the menu read path

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/waiter", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(handler::list_orders).post(handler::create_order))
        .route("/orders/history", get(handler::order_history))
        .route("/orders/{id}", get(handler::get_order))
        .route("/orders/{id}/status", put(handler::update_order_status))
        .route("/tables", get(handler::list_tables))
        .route("/tables/{id}/status", put(handler::update_table_status))
        .route("/menu", get(handler::menu))
}
