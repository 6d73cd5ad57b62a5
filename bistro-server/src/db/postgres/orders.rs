use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{Order, OrderItem, OrderStatus};

use super::{PgStore, parse_enum};
use crate::db::repository::{NewOrder, OrderRepository, RepoError, RepoResult, StatusChange};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    table_id: i64,
    waiter_id: i64,
    status: String,
    total_amount: Decimal,
    comment: Option<String>,
    created_at: i64,
    updated_at: i64,
    completed_at: Option<i64>,
    cancelled_at: Option<i64>,
    business_id: i64,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, RepoError> {
        Ok(Order {
            id: self.id,
            table_id: self.table_id,
            waiter_id: self.waiter_id,
            status: parse_enum(&self.status)?,
            total_amount: self.total_amount,
            comment: self.comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
            cancelled_at: self.cancelled_at,
            business_id: self.business_id,
            items,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    dish_id: i64,
    name: String,
    quantity: i32,
    price: Decimal,
    total: Decimal,
    notes: Option<String>,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: row.id,
            order_id: row.order_id,
            dish_id: row.dish_id,
            name: row.name,
            quantity: row.quantity,
            price: row.price,
            total: row.total,
            notes: row.notes,
        }
    }
}

fn status_strings(statuses: &[OrderStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

impl PgStore {
    /// Attach items to orders with one query
    async fn with_items(&self, rows: Vec<OrderRow>) -> RepoResult<Vec<Order>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let item_rows: Vec<OrderItemRow> =
            sqlx::query_as("SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY id")
                .bind(&ids)
                .fetch_all(&self.pool)
                .await?;

        let mut grouped: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            grouped.entry(row.order_id).or_default().push(row.into());
        }

        rows.into_iter()
            .map(|row| {
                let items = grouped.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect()
    }
}

#[async_trait]
impl OrderRepository for PgStore {
    async fn create(&self, order: NewOrder) -> RepoResult<Order> {
        let mut tx = self.pool.begin().await?;

        let row: OrderRow = sqlx::query_as(
            "INSERT INTO orders
                 (table_id, waiter_id, status, total_amount, comment,
                  created_at, updated_at, business_id)
             VALUES ($1, $2, 'new', $3, $4, $5, $5, $6)
             RETURNING *",
        )
        .bind(order.table_id)
        .bind(order.waiter_id)
        .bind(order.total_amount)
        .bind(&order.comment)
        .bind(order.now)
        .bind(order.business_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let item_row: OrderItemRow = sqlx::query_as(
                "INSERT INTO order_items (order_id, dish_id, name, quantity, price, total, notes)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING *",
            )
            .bind(row.id)
            .bind(item.dish_id)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(item.price)
            .bind(item.total)
            .bind(&item.notes)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item_row.into());
        }

        tx.commit().await?;
        row.into_order(items)
    }

    async fn find_by_id(&self, id: i64, business_id: i64) -> RepoResult<Option<Order>> {
        let row: Option<OrderRow> =
            sqlx::query_as("SELECT * FROM orders WHERE id = $1 AND business_id = $2")
                .bind(id)
                .bind(business_id)
                .fetch_optional(&self.pool)
                .await?;
        match row {
            Some(row) => Ok(self.with_items(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_by_status(
        &self,
        business_id: Option<i64>,
        statuses: &[OrderStatus],
    ) -> RepoResult<Vec<Order>> {
        let statuses = status_strings(statuses);
        let rows: Vec<OrderRow> = match business_id {
            Some(business_id) => {
                sqlx::query_as(
                    "SELECT * FROM orders WHERE business_id = $1 AND status = ANY($2)
                     ORDER BY created_at DESC, id DESC",
                )
                .bind(business_id)
                .bind(&statuses)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT * FROM orders WHERE status = ANY($1)
                     ORDER BY created_at DESC, id DESC",
                )
                .bind(&statuses)
                .fetch_all(&self.pool)
                .await?
            }
        };
        self.with_items(rows).await
    }

    async fn update_status(
        &self,
        id: i64,
        business_id: i64,
        change: StatusChange,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE orders
             SET status = $1, updated_at = $2, completed_at = $3, cancelled_at = $4
             WHERE id = $5 AND business_id = $6 AND status = $7",
        )
        .bind(change.to.as_str())
        .bind(change.updated_at)
        .bind(change.completed_at)
        .bind(change.cancelled_at)
        .bind(id)
        .bind(business_id)
        .bind(change.from.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_active_for_table(&self, table_id: i64, business_id: i64) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders
             WHERE table_id = $1 AND business_id = $2
               AND status NOT IN ('completed', 'cancelled')",
        )
        .bind(table_id)
        .bind(business_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_by_waiter(&self, waiter_id: i64) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE waiter_id = $1")
            .bind(waiter_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
