//! Table registry
//!
//! | Target   | Precondition          | Timestamps                                  |
//! |----------|-----------------------|---------------------------------------------|
//! | free     | no active orders      | both cleared                                |
//! | occupied | -                     | `occupied_at = now`, `reserved_at` kept     |
//! | reserved | -                     | `reserved_at = now`, `occupied_at` cleared  |

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, DiningTableCreate, TableStatus};
use shared::util::now_millis;

use crate::db::repository::{RepoError, TableState};
use crate::db::Repositories;

pub async fn list(repos: &Repositories, business_id: i64) -> AppResult<Vec<DiningTable>> {
    Ok(repos.tables.list(business_id).await?)
}

pub async fn get(repos: &Repositories, id: i64, business_id: i64) -> AppResult<DiningTable> {
    repos
        .tables
        .find_by_id(id, business_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))
}

pub async fn create(
    repos: &Repositories,
    business_id: i64,
    input: DiningTableCreate,
) -> AppResult<DiningTable> {
    if input.number <= 0 {
        return Err(AppError::validation("table number must be positive"));
    }
    if input.seats <= 0 {
        return Err(AppError::validation("seats must be positive"));
    }
    repos
        .tables
        .create(business_id, input.number, input.seats)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::TableNumberExists),
            other => other.into(),
        })
}

/// Timestamps for `target` given the table's current state
pub fn next_state(current: &DiningTable, target: TableStatus, now: i64) -> TableState {
    match target {
        TableStatus::Free => TableState {
            status: TableStatus::Free,
            reserved_at: None,
            occupied_at: None,
        },
        TableStatus::Occupied => TableState {
            status: TableStatus::Occupied,
            reserved_at: current.reserved_at,
            occupied_at: Some(now),
        },
        TableStatus::Reserved => TableState {
            status: TableStatus::Reserved,
            reserved_at: Some(now),
            occupied_at: None,
        },
    }
}

pub async fn update_status(
    repos: &Repositories,
    id: i64,
    business_id: i64,
    target: TableStatus,
) -> AppResult<DiningTable> {
    let table = get(repos, id, business_id).await?;

    if target == TableStatus::Free {
        let active = repos.orders.count_active_for_table(id, business_id).await?;
        if active > 0 {
            return Err(AppError::new(ErrorCode::TableHasActiveOrders));
        }
    }

    let state = next_state(&table, target, now_millis());
    let updated = repos
        .tables
        .set_state(id, business_id, state)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

    tracing::info!(
        table_id = id,
        business_id,
        from = table.status.as_str(),
        to = target.as_str(),
        "Table status changed"
    );
    Ok(updated)
}
