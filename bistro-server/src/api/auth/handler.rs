//! Authentication Handlers

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
};
use shared::client::{CurrentUserResponse, LoginRequest, LoginResponse};
use shared::error::AppResult;
use tower_cookies::Cookies;

use crate::api::ApiJson;
use crate::auth::cookies::{AUTH_COOKIE, BUSINESS_COOKIE, auth_cookie, expired, is_secure_request};
use crate::auth::login::{self, redirect_for};
use crate::auth::CurrentUser;
use crate::core::AppState;
use crate::tenancy::ResolvedBusiness;

/// POST /api/login
///
/// Returns the token in the body and also sets it as the `auth_token` cookie.
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    headers: HeaderMap,
    uri: Uri,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let outcome = login::login(&state, req).await?;

    let secure = is_secure_request(&headers, &uri);
    cookies.add(auth_cookie(outcome.token.clone(), outcome.max_age_secs, secure));

    Ok(Json(LoginResponse {
        token: outcome.token,
        role: outcome.user.role,
        redirect: redirect_for(outcome.user.role).to_string(),
        business_id: outcome.user.business_id,
    }))
}

/// POST /api/logout
pub async fn logout(cookies: Cookies) -> StatusCode {
    cookies.remove(expired(AUTH_COOKIE));
    cookies.remove(expired(BUSINESS_COOKIE));
    StatusCode::NO_CONTENT
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser, business: ResolvedBusiness) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        user_id: user.id,
        role: user.role,
        business_id: user.business_id,
        active_business_id: business.0,
    })
}
