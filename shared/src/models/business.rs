//! Business (tenant) Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    Active,
    Inactive,
    Suspended,
}

impl BusinessStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BusinessStatus::Active => "active",
            BusinessStatus::Inactive => "inactive",
            BusinessStatus::Suspended => "suspended",
        }
    }
}

impl FromStr for BusinessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BusinessStatus::Active),
            "inactive" => Ok(BusinessStatus::Inactive),
            "suspended" => Ok(BusinessStatus::Suspended),
            other => Err(format!("unknown business status: {other}")),
        }
    }
}

/// Business entity (one restaurant)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub status: BusinessStatus,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create business payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessCreate {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Update business status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessStatusUpdate {
    pub status: BusinessStatus,
}
