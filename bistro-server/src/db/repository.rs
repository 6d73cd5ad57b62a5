//! Repository contracts
//!
//! Every method that touches a per-business table takes `business_id`
//! explicitly and includes it in its predicate.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Business, BusinessCreate, BusinessStatus, Category, DiningTable, MenuItem, Order, OrderStatus,
    Role, TableStatus, User,
};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                RepoError::Conflict(db.message().to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Conflict(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// Write models
// =============================================================================

/// User row to insert; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub business_id: Option<i64>,
    pub now: i64,
}

#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub name: String,
    pub category_id: i64,
    pub business_id: i64,
    pub price: Decimal,
    pub is_available: bool,
    pub description: Option<String>,
    pub now: i64,
}

/// Full replacement values for a menu item update
#[derive(Debug, Clone)]
pub struct MenuItemChanges {
    pub name: String,
    pub category_id: i64,
    pub price: Decimal,
    pub is_available: bool,
    pub description: Option<String>,
    pub now: i64,
}

/// Target table state; timestamps are written exactly as given
#[derive(Debug, Clone, Copy)]
pub struct TableState {
    pub status: TableStatus,
    pub reserved_at: Option<i64>,
    pub occupied_at: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub dish_id: i64,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
}

/// Order plus items, persisted in a single transaction
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub table_id: i64,
    pub waiter_id: i64,
    pub business_id: i64,
    pub comment: Option<String>,
    pub total_amount: Decimal,
    pub items: Vec<NewOrderItem>,
    pub now: i64,
}

/// Status change applied only if the order is still in `from`
#[derive(Debug, Clone, Copy)]
pub struct StatusChange {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub updated_at: i64,
    pub completed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
}

// =============================================================================
// Traits
// =============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    /// `None` lists every user
    async fn list(&self, business_id: Option<i64>) -> RepoResult<Vec<User>>;
    /// Fails with `Duplicate` when the username is taken
    async fn create(&self, user: NewUser) -> RepoResult<User>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
    async fn touch_last_active(&self, id: i64, at: i64) -> RepoResult<()>;
}

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<Business>>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Business>>;
    async fn create(&self, data: BusinessCreate, now: i64) -> RepoResult<Business>;
    async fn update_status(
        &self,
        id: i64,
        status: BusinessStatus,
        now: i64,
    ) -> RepoResult<Option<Business>>;
}

#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn list_categories(&self, business_id: i64) -> RepoResult<Vec<Category>>;
    async fn find_category(&self, id: i64, business_id: i64) -> RepoResult<Option<Category>>;
    /// Fails with `Duplicate` when the name exists in the business
    async fn create_category(&self, business_id: i64, name: &str) -> RepoResult<Category>;
    async fn list_items(&self, business_id: i64) -> RepoResult<Vec<MenuItem>>;
    async fn find_item(&self, id: i64, business_id: i64) -> RepoResult<Option<MenuItem>>;
    async fn create_item(&self, item: NewMenuItem) -> RepoResult<MenuItem>;
    async fn update_item(
        &self,
        id: i64,
        business_id: i64,
        changes: MenuItemChanges,
    ) -> RepoResult<Option<MenuItem>>;
}

#[async_trait]
pub trait TableRepository: Send + Sync {
    async fn list(&self, business_id: i64) -> RepoResult<Vec<DiningTable>>;
    async fn find_by_id(&self, id: i64, business_id: i64) -> RepoResult<Option<DiningTable>>;
    /// Fails with `Duplicate` when the number exists in the business
    async fn create(&self, business_id: i64, number: i32, seats: i32) -> RepoResult<DiningTable>;
    async fn set_state(
        &self,
        id: i64,
        business_id: i64,
        state: TableState,
    ) -> RepoResult<Option<DiningTable>>;
    /// `free -> occupied` only; returns whether a row changed
    async fn occupy_if_free(&self, id: i64, business_id: i64, now: i64) -> RepoResult<bool>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: NewOrder) -> RepoResult<Order>;
    async fn find_by_id(&self, id: i64, business_id: i64) -> RepoResult<Option<Order>>;
    /// Orders in any of `statuses`, newest first; `None` spans all businesses
    async fn list_by_status(
        &self,
        business_id: Option<i64>,
        statuses: &[OrderStatus],
    ) -> RepoResult<Vec<Order>>;
    /// Conditional on the current status; returns whether a row changed
    async fn update_status(
        &self,
        id: i64,
        business_id: i64,
        change: StatusChange,
    ) -> RepoResult<bool>;
    async fn count_active_for_table(&self, table_id: i64, business_id: i64) -> RepoResult<i64>;
    async fn count_by_waiter(&self, waiter_id: i64) -> RepoResult<i64>;
}
