//! Admin Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use shared::error::AppResult;
use shared::models::{Business, BusinessCreate, BusinessStatusUpdate, User, UserCreate};

use crate::api::{ApiJson, ApiPath};
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::services::{businesses, users};
use crate::tenancy::ResolvedBusiness;

/// GET /api/admin/businesses
pub async fn list_businesses(State(state): State<AppState>) -> AppResult<Json<Vec<Business>>> {
    Ok(Json(businesses::list_all(&state.repos).await?))
}

/// POST /api/admin/businesses
pub async fn create_business(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BusinessCreate>,
) -> AppResult<(StatusCode, Json<Business>)> {
    let business = businesses::create(&state.repos, payload).await?;
    Ok((StatusCode::CREATED, Json(business)))
}

/// GET /api/admin/businesses/{id}
pub async fn get_business(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Business>> {
    Ok(Json(businesses::get(&state.repos, id).await?))
}

/// PUT /api/admin/businesses/{id}/status
pub async fn update_business_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<BusinessStatusUpdate>,
) -> AppResult<Json<Business>> {
    let business = businesses::update_status(&state.repos, id, payload.status).await?;
    Ok(Json(business))
}

/// GET /api/admin/users - filtered by the resolved business when one is set
pub async fn list_users(
    State(state): State<AppState>,
    business: ResolvedBusiness,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(users::list(&state.repos, business.get()).await?))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    actor: CurrentUser,
    business: ResolvedBusiness,
    ApiJson(payload): ApiJson<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = users::create(&state.repos, &actor, business.get(), payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    actor: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    users::delete(&state.repos, &actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
