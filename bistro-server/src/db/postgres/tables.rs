use async_trait::async_trait;
use shared::models::DiningTable;

use super::{PgStore, parse_enum};
use crate::db::repository::{RepoError, RepoResult, TableRepository, TableState};

#[derive(sqlx::FromRow)]
struct TableRow {
    id: i64,
    number: i32,
    seats: i32,
    status: String,
    reserved_at: Option<i64>,
    occupied_at: Option<i64>,
    business_id: i64,
}

impl TryFrom<TableRow> for DiningTable {
    type Error = RepoError;

    fn try_from(row: TableRow) -> Result<Self, Self::Error> {
        Ok(DiningTable {
            id: row.id,
            number: row.number,
            seats: row.seats,
            status: parse_enum(&row.status)?,
            reserved_at: row.reserved_at,
            occupied_at: row.occupied_at,
            business_id: row.business_id,
        })
    }
}

#[async_trait]
impl TableRepository for PgStore {
    async fn list(&self, business_id: i64) -> RepoResult<Vec<DiningTable>> {
        let rows: Vec<TableRow> =
            sqlx::query_as("SELECT * FROM dining_tables WHERE business_id = $1 ORDER BY number")
                .bind(business_id)
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(DiningTable::try_from).collect()
    }

    async fn find_by_id(&self, id: i64, business_id: i64) -> RepoResult<Option<DiningTable>> {
        let row: Option<TableRow> =
            sqlx::query_as("SELECT * FROM dining_tables WHERE id = $1 AND business_id = $2")
                .bind(id)
                .bind(business_id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(DiningTable::try_from).transpose()
    }

    async fn create(&self, business_id: i64, number: i32, seats: i32) -> RepoResult<DiningTable> {
        let row: TableRow = sqlx::query_as(
            "INSERT INTO dining_tables (number, seats, status, business_id)
             VALUES ($1, $2, 'free', $3)
             RETURNING *",
        )
        .bind(number)
        .bind(seats)
        .bind(business_id)
        .fetch_one(&self.pool)
        .await?;
        DiningTable::try_from(row)
    }

    async fn set_state(
        &self,
        id: i64,
        business_id: i64,
        state: TableState,
    ) -> RepoResult<Option<DiningTable>> {
        let row: Option<TableRow> = sqlx::query_as(
            "UPDATE dining_tables SET status = $1, reserved_at = $2, occupied_at = $3
             WHERE id = $4 AND business_id = $5
             RETURNING *",
        )
        .bind(state.status.as_str())
        .bind(state.reserved_at)
        .bind(state.occupied_at)
        .bind(id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(DiningTable::try_from).transpose()
    }

    async fn occupy_if_free(&self, id: i64, business_id: i64, now: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE dining_tables SET status = 'occupied', occupied_at = $1
             WHERE id = $2 AND business_id = $3 AND status = 'free'",
        )
        .bind(now)
        .bind(id)
        .bind(business_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
