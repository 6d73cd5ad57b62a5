//! Storage layer
//!
//! - [`repository`]: repository traits, write models and [`RepoError`]
//! - [`postgres`]: `sqlx` PostgreSQL implementation
//! - [`memory`]: mutex-guarded in-memory implementation

pub mod memory;
pub mod postgres;
pub mod repository;

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::core::Config;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{
    BusinessRepository, MenuRepository, OrderRepository, RepoError, RepoResult, TableRepository,
    UserRepository,
};

/// Repositories shared by every request
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub businesses: Arc<dyn BusinessRepository>,
    pub menu: Arc<dyn MenuRepository>,
    pub tables: Arc<dyn TableRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    /// Use one store for every repository
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + BusinessRepository
            + MenuRepository
            + TableRepository
            + OrderRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            businesses: store.clone(),
            menu: store.clone(),
            tables: store.clone(),
            orders: store,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::from_store(Arc::new(PgStore::new(pool)))
    }

    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self::from_store(store)
    }
}

/// Open the pool and run pending migrations
///
/// `min_connections` is the warm set kept open; idle connections above it
/// are reaped after `idle_timeout`, and every connection is recycled after
/// `max_lifetime`.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .idle_timeout(Duration::from_secs(config.db_idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime_secs))
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        min_connections = config.db_min_connections,
        "Database pool ready"
    );
    Ok(pool)
}
