//! Bistro server - multi-tenant restaurant management core
//!
//! # Module layout
//!
//! ```text
//! bistro-server/src/
//! ├── core/       # configuration, state, server bootstrap
//! ├── auth/       # tokens, passwords, role gate
//! ├── tenancy/    # business_id resolution
//! ├── db/         # repository traits, PostgreSQL and in-memory stores
//! ├── services/   # businesses, users, menu, tables
//! ├── orders/     # order state machine and engine
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # logging
//! ```
//!
//! Every request passes, in order: request logging, token verification,
//! tenancy resolution, the role gate, then the handler.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod tenancy;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{AppState, Config, Server};
pub use db::Repositories;

/// Security event on the `security` target
///
/// ```ignore
/// security_log!(WARN, "auth_failed", uri = %req.uri());
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr $(, $($arg:tt)*)?) => {
        tracing::warn!(target: "security", event = $event $(, $($arg)*)?)
    };
    (INFO, $event:expr $(, $($arg:tt)*)?) => {
        tracing::info!(target: "security", event = $event $(, $($arg)*)?)
    };
}
