//! Application state

use std::sync::Arc;

use crate::auth::JwtService;
use crate::auth::password;
use crate::core::Config;
use crate::db::{self, MemoryStore, Repositories};
use crate::orders::OrderEngine;
use crate::services;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub repos: Repositories,
    pub jwt_service: Arc<JwtService>,
    pub orders: OrderEngine,
}

impl AppState {
    /// Build state over already-constructed repositories
    pub fn with_repositories(config: Config, repos: Repositories) -> Self {
        if !password::init_dummy_hash() {
            tracing::warn!("Dummy password hash unavailable; unknown-user logins skip hashing");
        }
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret));
        Self {
            orders: OrderEngine::new(repos.clone()),
            config: Arc::new(config),
            repos,
            jwt_service,
        }
    }

    /// Connect storage per `DATABASE_URL` and build state
    pub async fn initialize(config: Config) -> Result<Self, BoxError> {
        let repos = if config.uses_memory_store() {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Repositories::memory(Arc::new(MemoryStore::new()))
        } else {
            Repositories::postgres(db::connect(&config).await?)
        };
        let state = Self::with_repositories(config, repos);

        if let Some(admin) = &state.config.bootstrap_admin {
            services::users::ensure_admin(&state.repos, &admin.username, &admin.password)
                .await
                .map_err(|e| format!("bootstrap admin: {e}"))?;
        }
        Ok(state)
    }
}
