//! Core module - configuration, state and server
//!
//! - [`Config`] - server configuration
//! - [`AppState`] - shared state
//! - [`Server`] - HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, LogFormat};
pub use server::Server;
pub use state::AppState;
