//! bistro-server - multi-tenant restaurant backend
//!
//! Reads configuration from the environment (and `.env`), connects storage,
//! then serves the HTTP API until ctrl-c.

use bistro_server::utils::init_logger;
use bistro_server::{AppState, Config, Server};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    let _log_guard = init_logger(config.log_format, config.log_dir.as_deref());

    tracing::info!(
        env = %config.environment,
        memory_store = config.uses_memory_store(),
        "Starting bistro-server"
    );

    let state = AppState::initialize(config.clone()).await?;
    Server::with_state(config, state).run().await
}
