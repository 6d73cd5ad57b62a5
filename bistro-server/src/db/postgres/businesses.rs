use async_trait::async_trait;
use shared::models::{Business, BusinessCreate, BusinessStatus};

use super::{PgStore, parse_enum};
use crate::db::repository::{BusinessRepository, RepoError, RepoResult};

#[derive(sqlx::FromRow)]
struct BusinessRow {
    id: i64,
    name: String,
    status: String,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<BusinessRow> for Business {
    type Error = RepoError;

    fn try_from(row: BusinessRow) -> Result<Self, Self::Error> {
        Ok(Business {
            id: row.id,
            name: row.name,
            status: parse_enum(&row.status)?,
            phone: row.phone,
            email: row.email,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl BusinessRepository for PgStore {
    async fn list(&self) -> RepoResult<Vec<Business>> {
        let rows: Vec<BusinessRow> = sqlx::query_as("SELECT * FROM businesses ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Business::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Business>> {
        let row: Option<BusinessRow> = sqlx::query_as("SELECT * FROM businesses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Business::try_from).transpose()
    }

    async fn create(&self, data: BusinessCreate, now: i64) -> RepoResult<Business> {
        let row: BusinessRow = sqlx::query_as(
            "INSERT INTO businesses (name, status, phone, email, address, created_at, updated_at)
             VALUES ($1, 'active', $2, $3, $4, $5, $5)
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Business::try_from(row)
    }

    async fn update_status(
        &self,
        id: i64,
        status: BusinessStatus,
        now: i64,
    ) -> RepoResult<Option<Business>> {
        let row: Option<BusinessRow> = sqlx::query_as(
            "UPDATE businesses SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
        .bind(status.as_str())
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Business::try_from).transpose()
    }
}
