//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// `DATABASE_URL` value selecting the in-memory store
pub const MEMORY_DATABASE_URL: &str = "memory://";

const MIN_SECRET_LEN: usize = 32;

/// Output format of the console logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL, or `memory://`
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HMAC secret for signing bearer tokens
    pub jwt_secret: String,
    /// Pool max-open connections
    pub db_max_connections: u32,
    /// Pool warm connections, kept below `db_max_connections`
    pub db_min_connections: u32,
    pub db_idle_timeout_secs: u64,
    pub db_max_lifetime_secs: u64,
    pub db_acquire_timeout_secs: u64,
    pub log_format: LogFormat,
    /// Optional directory for the daily rolling log file
    pub log_dir: Option<String>,
    /// Admin account created at startup when no user has this username
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// `BOOTSTRAP_ADMIN_USERNAME` / `BOOTSTRAP_ADMIN_PASSWORD`
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Require a secret env var: must be set and long enough outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production-use")
            }
        };
        if val.len() < MIN_SECRET_LEN && environment != "development" {
            return Err(format!("{name} must be at least {MIN_SECRET_LEN} bytes").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let db_max_connections = env_or("DB_MAX_CONNECTIONS", 20u32).max(1);
        let db_min_connections = env_or("DB_MIN_CONNECTIONS", 5u32).min(db_max_connections - 1);

        let log_format = match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: env_or("HTTP_PORT", 8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            db_max_connections,
            db_min_connections,
            db_idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", 300),
            db_max_lifetime_secs: env_or("DB_MAX_LIFETIME_SECS", 1800),
            db_acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 10),
            log_format,
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            bootstrap_admin: match (
                std::env::var("BOOTSTRAP_ADMIN_USERNAME"),
                std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
            ) {
                (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                    Some(BootstrapAdmin { username, password })
                }
                _ => None,
            },
        })
    }

    /// Development configuration over the in-memory store
    pub fn for_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: MEMORY_DATABASE_URL.into(),
            http_port: 8080,
            environment: "development".into(),
            jwt_secret: jwt_secret.into(),
            db_max_connections: 20,
            db_min_connections: 5,
            db_idle_timeout_secs: 300,
            db_max_lifetime_secs: 1800,
            db_acquire_timeout_secs: 10,
            log_format: LogFormat::Text,
            log_dir: None,
            bootstrap_admin: None,
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
