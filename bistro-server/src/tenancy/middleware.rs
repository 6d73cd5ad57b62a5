//! Tenancy resolution middleware

use axum::{extract::Request, middleware::Next, response::Response};
use tower_cookies::Cookies;

use super::ResolvedBusiness;
use super::resolver::{BUSINESS_HEADER, resolve_business_id};
use crate::auth::CurrentUser;
use crate::auth::cookies::BUSINESS_COOKIE;

/// Compute the request's business once and store it as [`ResolvedBusiness`]
///
/// Runs after authentication. Requests without a principal resolve from the
/// cookie and header alone.
pub async fn resolve_business(cookies: Cookies, mut req: Request, next: Next) -> Response {
    let token_business = req
        .extensions()
        .get::<CurrentUser>()
        .and_then(|u| u.business_id);
    let cookie = cookies.get(BUSINESS_COOKIE).map(|c| c.value().to_string());
    let header = req
        .headers()
        .get(BUSINESS_HEADER)
        .and_then(|v| v.to_str().ok());

    let business_id = resolve_business_id(token_business, cookie.as_deref(), header);
    req.extensions_mut().insert(ResolvedBusiness(business_id));

    next.run(req).await
}
