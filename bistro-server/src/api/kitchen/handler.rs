//! Kitchen Handlers

use axum::{
    Json,
    extract::State,
};
use shared::error::AppResult;
use shared::models::{Order, OrderStatusUpdate};

use crate::api::{ApiJson, ApiPath};
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::tenancy::{BusinessScope, ResolvedBusiness};

/// GET /api/kitchen/orders
///
/// An admin without a resolved business sees every business's queue.
pub async fn list_preparing(
    State(state): State<AppState>,
    business: ResolvedBusiness,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_preparing(business.get()).await?))
}

/// PUT /api/kitchen/orders/{id}/status - only `{"status":"ready"}`
pub async fn mark_ready(
    State(state): State<AppState>,
    user: CurrentUser,
    BusinessScope(business_id): BusinessScope,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .mark_ready(id, business_id, user.role, payload.status)
        .await?;
    Ok(Json(order))
}
