//! Manager Handlers
//!
//! Every handler is scoped by [`BusinessScope`]; a request without a
//! resolved business is rejected before any storage access.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use shared::error::AppResult;
use shared::models::{
    Category, CategoryCreate, CategoryWithItems, DiningTable, DiningTableCreate, MenuItem,
    MenuItemCreate, MenuItemUpdate, User, UserCreate,
};

use crate::api::{ApiJson, ApiPath};
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::services::{menu, tables, users};
use crate::tenancy::BusinessScope;

/// GET /api/manager/users
pub async fn list_users(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(users::list(&state.repos, Some(business_id)).await?))
}

/// POST /api/manager/users
pub async fn create_user(
    State(state): State<AppState>,
    actor: CurrentUser,
    BusinessScope(business_id): BusinessScope,
    ApiJson(payload): ApiJson<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = users::create(&state.repos, &actor, Some(business_id), payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/manager/menu
pub async fn menu(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
) -> AppResult<Json<Vec<CategoryWithItems>>> {
    Ok(Json(
        menu::list_categories_and_items(&state.repos, business_id).await?,
    ))
}

/// POST /api/manager/menu/categories
pub async fn create_category(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
    ApiJson(payload): ApiJson<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = menu::create_category(&state.repos, business_id, payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// POST /api/manager/menu/items
pub async fn create_item(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
    ApiJson(payload): ApiJson<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    let item = menu::create_item(&state.repos, business_id, payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/manager/menu/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    Ok(Json(
        menu::update_item(&state.repos, id, business_id, payload).await?,
    ))
}

/// POST /api/manager/tables
pub async fn create_table(
    State(state): State<AppState>,
    BusinessScope(business_id): BusinessScope,
    ApiJson(payload): ApiJson<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    let table = tables::create(&state.repos, business_id, payload).await?;
    Ok((StatusCode::CREATED, Json(table)))
}
