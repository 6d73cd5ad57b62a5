//! Authentication and role-gate middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;
use tower_cookies::Cookies;

use super::cookies::AUTH_COOKIE;
use super::permissions::{ResourceClass, role_allows};
use super::{CurrentUser, JwtError, JwtService};
use crate::core::AppState;
use crate::security_log;

/// Routes served without a token
const PUBLIC_API_ROUTES: &[&str] = &["/api/login", "/api/logout", "/api/health"];

/// Requests that bypass authentication: CORS preflight, non-API paths and
/// the public API routes
pub fn is_public_request(req: &Request) -> bool {
    let path = req.uri().path();
    req.method() == http::Method::OPTIONS
        || !path.starts_with("/api/")
        || PUBLIC_API_ROUTES.contains(&path)
}

/// Token from the `auth_token` cookie, falling back to `Authorization: Bearer`
fn extract_token(cookies: &Cookies, req: &Request) -> Option<String> {
    if let Some(cookie) = cookies.get(AUTH_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
        .map(str::to_string)
}

/// Authentication middleware
///
/// Verifies the bearer token and injects [`CurrentUser`] into request
/// extensions. Missing, expired or forged tokens all yield 401.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public_request(&req) {
        return Ok(next.run(req).await);
    }

    let Some(token) = extract_token(&cookies, &req) else {
        security_log!(WARN, "auth_missing", uri = %req.uri());
        return Err(AppError::unauthorized());
    };

    match state.jwt_service.validate_token(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(CurrentUser::from(claims));
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(WARN, "auth_failed", error = %e, uri = %req.uri());
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

/// Role gate middleware
///
/// Runs after authentication; denies with 403 when the principal's role may
/// not reach the path's resource class.
pub async fn authorize(req: Request, next: Next) -> Result<Response, AppError> {
    if is_public_request(&req) {
        return Ok(next.run(req).await);
    }

    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;

    let class = ResourceClass::from_path(req.uri().path());
    if !role_allows(user.role, class) {
        security_log!(
            WARN,
            "permission_denied",
            user_id = user.id,
            role = user.role.as_str(),
            resource_class = class.as_str(),
            uri = %req.uri()
        );
        return Err(AppError::forbidden());
    }

    Ok(next.run(req).await)
}
