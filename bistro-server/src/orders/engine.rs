//! Order engine
//!
//! Creates orders, applies status transitions and keeps table status in
//! step. The order write and the table follow-up are separate operations:
//! a failed table update is logged and never undoes the committed order.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderCreate, OrderStatus, Role, TableStatus};
use shared::util::now_millis;

use super::money::{MAX_AMOUNT, line_total, order_total, validate_quantity};
use super::transitions::{can_transition, role_may_request};
use crate::db::Repositories;
use crate::db::repository::{NewOrder, NewOrderItem, StatusChange, TableState};

/// Statuses listed by the waiter's active view
pub const ACTIVE_STATUSES: [OrderStatus; 5] = [
    OrderStatus::New,
    OrderStatus::Accepted,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Served,
];

pub const TERMINAL_STATUSES: [OrderStatus; 2] = [OrderStatus::Completed, OrderStatus::Cancelled];

#[derive(Clone)]
pub struct OrderEngine {
    repos: Repositories,
}

impl OrderEngine {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Create an order for `table_id`, snapshotting dish name and price
    pub async fn create(
        &self,
        business_id: i64,
        waiter_id: i64,
        input: OrderCreate,
    ) -> AppResult<Order> {
        if input.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        for item in &input.items {
            validate_quantity(item.quantity)?;
        }

        let table = self
            .repos
            .tables
            .find_by_id(input.table_id, business_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

        let mut items = Vec::with_capacity(input.items.len());
        for item in input.items {
            let dish = self
                .repos
                .menu
                .find_item(item.dish_id, business_id)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::DishNotFound))?;
            if !dish.is_available {
                return Err(AppError::new(ErrorCode::DishNotAvailable));
            }
            items.push(NewOrderItem {
                dish_id: dish.id,
                total: line_total(dish.price, item.quantity),
                name: dish.name,
                quantity: item.quantity,
                price: dish.price,
                notes: item.notes.filter(|n| !n.trim().is_empty()),
            });
        }

        let total_amount = order_total(items.iter().map(|i| i.total));
        if total_amount > MAX_AMOUNT {
            return Err(AppError::validation(format!(
                "order total exceeds maximum allowed ({MAX_AMOUNT})"
            )));
        }

        let now = now_millis();
        let order = self
            .repos
            .orders
            .create(NewOrder {
                table_id: table.id,
                waiter_id,
                business_id,
                comment: input.comment.filter(|c| !c.trim().is_empty()),
                total_amount,
                items,
                now,
            })
            .await?;

        tracing::info!(
            order_id = order.id,
            table_id = table.id,
            business_id,
            total = %order.total_amount,
            "Order created"
        );

        if table.status == TableStatus::Free {
            self.occupy_table(table.id, business_id, now).await;
        }

        Ok(order)
    }

    pub async fn get(&self, order_id: i64, business_id: i64) -> AppResult<Order> {
        self.repos
            .orders
            .find_by_id(order_id, business_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
    }

    pub async fn list_active(&self, business_id: i64) -> AppResult<Vec<Order>> {
        Ok(self
            .repos
            .orders
            .list_by_status(Some(business_id), &ACTIVE_STATUSES)
            .await?)
    }

    pub async fn list_history(&self, business_id: i64) -> AppResult<Vec<Order>> {
        Ok(self
            .repos
            .orders
            .list_by_status(Some(business_id), &TERMINAL_STATUSES)
            .await?)
    }

    /// Orders waiting in the kitchen; `None` spans all businesses
    pub async fn list_preparing(&self, business_id: Option<i64>) -> AppResult<Vec<Order>> {
        Ok(self
            .repos
            .orders
            .list_by_status(business_id, &[OrderStatus::Preparing])
            .await?)
    }

    /// Move an order to `target` on behalf of `role`
    ///
    /// Checks, in order: existence (404), the transition table (400), the
    /// role rule (403). The write is conditional on the status just read,
    /// so a concurrent change surfaces as an invalid transition.
    pub async fn update_status(
        &self,
        order_id: i64,
        business_id: i64,
        role: Role,
        target: OrderStatus,
    ) -> AppResult<Order> {
        let order = self.get(order_id, business_id).await?;
        let from = order.status;

        if !can_transition(from, target) {
            return Err(AppError::new(ErrorCode::InvalidStatusTransition));
        }
        if !role_may_request(role, from, target) {
            return Err(AppError::forbidden());
        }

        let now = now_millis();
        let change = StatusChange {
            from,
            to: target,
            updated_at: now,
            completed_at: (target == OrderStatus::Completed).then_some(now),
            cancelled_at: (target == OrderStatus::Cancelled).then_some(now),
        };

        let applied = self
            .repos
            .orders
            .update_status(order_id, business_id, change)
            .await?;
        if !applied {
            tracing::warn!(order_id, from = %from, to = %target, "Lost status update race");
            return Err(AppError::new(ErrorCode::InvalidStatusTransition));
        }

        tracing::info!(order_id, business_id, from = %from, to = %target, "Order status changed");

        if target.is_terminal() {
            self.release_table(order.table_id, business_id).await;
        }

        self.get(order_id, business_id).await
    }

    /// Kitchen path: only `preparing -> ready`
    pub async fn mark_ready(
        &self,
        order_id: i64,
        business_id: i64,
        role: Role,
        target: OrderStatus,
    ) -> AppResult<Order> {
        if target != OrderStatus::Ready {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                "kitchen may only set status to ready",
            ));
        }
        self.update_status(order_id, business_id, role, target).await
    }

    /// Best-effort `free -> occupied` after order creation
    async fn occupy_table(&self, table_id: i64, business_id: i64, now: i64) {
        match self.repos.tables.occupy_if_free(table_id, business_id, now).await {
            Ok(true) => tracing::info!(table_id, business_id, "Table occupied"),
            Ok(false) => {}
            Err(e) => tracing::error!(table_id, business_id, error = %e, "Failed to occupy table"),
        }
    }

    /// Best-effort release once the table has no active orders
    async fn release_table(&self, table_id: i64, business_id: i64) {
        let active = match self
            .repos
            .orders
            .count_active_for_table(table_id, business_id)
            .await
        {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(table_id, business_id, error = %e, "Failed to count active orders");
                return;
            }
        };
        if active > 0 {
            return;
        }

        let free = TableState {
            status: TableStatus::Free,
            reserved_at: None,
            occupied_at: None,
        };
        match self.repos.tables.set_state(table_id, business_id, free).await {
            Ok(Some(_)) => tracing::info!(table_id, business_id, "Table released"),
            Ok(None) => tracing::error!(table_id, business_id, "Table vanished before release"),
            Err(e) => tracing::error!(table_id, business_id, error = %e, "Failed to release table"),
        }
    }
}
