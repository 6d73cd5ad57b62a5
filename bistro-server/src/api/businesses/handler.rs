//! Business Handlers

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Uri},
};
use shared::client::BusinessSelected;
use shared::error::{AppError, AppResult};
use shared::models::Business;
use tower_cookies::Cookies;

use crate::api::ApiPath;
use crate::auth::CurrentUser;
use crate::auth::cookies::{business_cookie, is_secure_request};
use crate::core::AppState;
use crate::security_log;
use crate::services::businesses;

/// GET /api/businesses - admins see every business, others their own
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Business>>> {
    let list = businesses::list_visible(&state.repos, &user).await?;
    Ok(Json(list))
}

/// POST /api/businesses/{id}/select - pin the business via cookie
pub async fn select(
    State(state): State<AppState>,
    user: CurrentUser,
    cookies: Cookies,
    headers: HeaderMap,
    uri: Uri,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<BusinessSelected>> {
    let business = businesses::get(&state.repos, id).await?;

    if !user.is_admin() && user.business_id != Some(business.id) {
        security_log!(
            WARN,
            "cross_tenant_select",
            user_id = user.id,
            requested_business = business.id
        );
        return Err(AppError::forbidden());
    }

    cookies.add(business_cookie(business.id, is_secure_request(&headers, &uri)));
    tracing::info!(user_id = user.id, business_id = business.id, "Business selected");

    Ok(Json(BusinessSelected {
        business_id: business.id,
    }))
}
