//! Order Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Accepted,
    Preparing,
    Ready,
    Served,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::New,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// `completed` and `cancelled` have no outbound transitions
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub const fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// Order line with name and price captured at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub dish_id: i64,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
}

/// Order with its items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub waiter_id: i64,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub comment: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub completed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub business_id: i64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Order line requested by a waiter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    #[serde(alias = "dish_id")]
    pub dish_id: i64,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(alias = "table_id")]
    pub table_id: i64,
    pub comment: Option<String>,
    pub items: Vec<OrderItemInput>,
}

/// Update order status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        let terminal: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(OrderStatus::is_terminal)
            .collect();
        assert_eq!(terminal, vec![OrderStatus::Completed, OrderStatus::Cancelled]);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("preparing".parse::<OrderStatus>(), Ok(OrderStatus::Preparing));
        assert!("done".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_create_payload_ignores_unknown_fields() {
        let json = r#"{"tableId":10,"items":[{"dishId":20,"quantity":2}],"extra":true}"#;
        let create: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(create.table_id, 10);
        assert_eq!(create.items[0].dish_id, 20);
        assert_eq!(create.items[0].quantity, 2);
        assert!(create.comment.is_none());
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(serde_json::from_str::<OrderStatusUpdate>(r#"{"status":"eaten"}"#).is_err());
    }
}
