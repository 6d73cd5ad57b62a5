use async_trait::async_trait;
use shared::models::User;

use super::{PgStore, parse_enum};
use crate::db::repository::{NewUser, RepoError, RepoResult, UserRepository};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    email: String,
    name: String,
    role: String,
    status: String,
    business_id: Option<i64>,
    last_active_at: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<UserRow> for User {
    type Error = RepoError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            name: row.name,
            role: parse_enum(&row.role)?,
            status: parse_enum(&row.status)?,
            business_id: row.business_id,
            last_active_at: row.last_active_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, username, password_hash, email, name, role, status, \
                            business_id, last_active_at, created_at, updated_at";

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1"))
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;
        row.map(User::try_from).transpose()
    }

    async fn list(&self, business_id: Option<i64>) -> RepoResult<Vec<User>> {
        let rows: Vec<UserRow> = match business_id {
            Some(business_id) => {
                sqlx::query_as(&format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE business_id = $1 ORDER BY id"
                ))
                .bind(business_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        rows.into_iter().map(User::try_from).collect()
    }

    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (username, password_hash, email, name, role, status, \
             business_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, 'active', $6, $7, $7) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.business_id)
        .bind(user.now)
        .fetch_one(&self.pool)
        .await?;
        User::try_from(row)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn touch_last_active(&self, id: i64, at: i64) -> RepoResult<()> {
        sqlx::query("UPDATE users SET last_active_at = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
