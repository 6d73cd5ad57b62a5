//! Waiter Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use shared::error::AppResult;
use shared::models::{
    CategoryWithItems, DiningTable, Order, OrderCreate, OrderStatusUpdate, TableStatusUpdate,
};

use crate::api::{ApiJson, ApiPath};
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::services::{menu, tables};
use crate::tenancy::BusinessScope;

/// GET /api/waiter/orders - active orders, newest first
pub async fn list_orders(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_active(business_id).await?))
}

/// POST /api/waiter/orders
pub async fn create_order(
    State(state): State<AppState>,
    user: CurrentUser,
    BusinessScope(business_id): BusinessScope,
    ApiJson(payload): ApiJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.orders.create(business_id, user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/waiter/orders/history - completed and cancelled orders
pub async fn order_history(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_history(business_id).await?))
}

/// GET /api/waiter/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.get(id, business_id).await?))
}

/// PUT /api/waiter/orders/{id}/status
pub async fn update_order_status(
    State(state): State<AppState>,
    user: CurrentUser,
    BusinessScope(business_id): BusinessScope,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .update_status(id, business_id, user.role, payload.status)
        .await?;
    Ok(Json(order))
}

/// GET /api/waiter/tables
pub async fn list_tables(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
) -> AppResult<Json<Vec<DiningTable>>> {
    Ok(Json(tables::list(&state.repos, business_id).await?))
}

/// PUT /api/waiter/tables/{id}/status
pub async fn update_table_status(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<TableStatusUpdate>,
) -> AppResult<Json<DiningTable>> {
    let table = tables::update_status(&state.repos, id, business_id, payload.status).await?;
    Ok(Json(table))
}

/// GET /api/waiter/menu
pub async fn menu(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
) -> AppResult<Json<Vec<CategoryWithItems>>> {
    Ok(Json(
        menu::list_categories_and_items(&state.repos, business_id).await?,
    ))
}
