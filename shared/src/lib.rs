//! Shared types for the bistro server
//!
//! Error codes, domain models and API DTOs used by the server and its
//! clients. This crate performs no I/O.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
