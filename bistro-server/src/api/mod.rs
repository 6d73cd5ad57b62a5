//! API routes
//!
//! - [`health`] - liveness probe
//! - [`auth`] - login, logout, principal info
//! - [`businesses`] - business listing and selection
//! - [`admin`] - business and user administration
//! - [`manager`] - staff, menu and table management
//! - [`waiter`] - orders, tables and menu for the floor
//! - [`kitchen`] - preparing queue

pub mod json;
pub mod middleware;
pub mod path;

pub mod admin;
pub mod auth;
pub mod businesses;
pub mod health;
pub mod kitchen;
pub mod manager;
pub mod waiter;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use uuid::Uuid;

use crate::core::AppState;

pub use json::ApiJson;
pub use path::ApiPath;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(businesses::router())
        .merge(admin::router())
        .merge(manager::router())
        .merge(waiter::router())
        .merge(kitchen::router())
}

/// Build the application with every middleware layer and state attached
///
/// Layers run outermost first: request logging, request id, CORS, cookies,
/// authentication, tenancy resolution, role gate.
pub fn build_app(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        .layer(axum_middleware::from_fn(crate::auth::authorize))
        .layer(axum_middleware::from_fn(crate::tenancy::resolve_business))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        .layer(CookieManagerLayer::new())
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .with_state(state)
}
