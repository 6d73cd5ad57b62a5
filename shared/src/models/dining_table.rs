//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Table occupancy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Free,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Free => "free",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
        }
    }
}

impl FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(TableStatus::Free),
            "occupied" => Ok(TableStatus::Occupied),
            "reserved" => Ok(TableStatus::Reserved),
            other => Err(format!("unknown table status: {other}")),
        }
    }
}

/// Dining table entity
///
/// Timestamp invariants:
/// - `free` ⇒ `reserved_at` and `occupied_at` are both null
/// - `occupied` ⇒ `occupied_at` is set
/// - `reserved` ⇒ `reserved_at` is set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub number: i32,
    pub seats: i32,
    pub status: TableStatus,
    pub reserved_at: Option<i64>,
    pub occupied_at: Option<i64>,
    pub business_id: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub number: i32,
    pub seats: i32,
}

/// Update table status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}
