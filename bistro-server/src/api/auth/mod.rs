//! Auth API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/login | POST | public |
//! | /api/logout | POST | public |
//! | /api/auth/me | GET | token |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(handler::login))
        .route("/api/logout", post(handler::logout))
        .route("/api/auth/me", get(handler::me))
}
