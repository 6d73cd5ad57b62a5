//! PostgreSQL repository implementation
//!
//! Runtime `query_as` with `$n` binds. Enum columns are stored as text and
//! parsed on the way out; a value the models cannot parse is a database error.

mod businesses;
mod menu;
mod orders;
mod tables;
mod users;

use std::str::FromStr;

use sqlx::PgPool;

use super::repository::RepoError;

/// Pool-backed store implementing every repository trait
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn parse_enum<T: FromStr<Err = String>>(value: &str) -> Result<T, RepoError> {
    value.parse().map_err(RepoError::Database)
}
