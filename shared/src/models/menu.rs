//! Menu Models (categories and dishes)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub business_id: i64,
}

/// Menu item (dish)
///
/// `business_id` always equals the owning category's `business_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub business_id: i64,
    pub price: Decimal,
    pub is_available: bool,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Category with its dishes, used by the menu listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithItems {
    #[serde(flatten)]
    pub category: Category,
    pub items: Vec<MenuItem>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(alias = "category_id")]
    pub category_id: i64,
    pub price: Decimal,
    #[serde(default = "default_available", alias = "is_available")]
    pub is_available: bool,
    pub description: Option<String>,
}

fn default_available() -> bool {
    true
}

/// Update menu item payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    #[serde(alias = "category_id")]
    pub category_id: Option<i64>,
    pub price: Option<Decimal>,
    #[serde(alias = "is_available")]
    pub is_available: Option<bool>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_accepts_bare_price() {
        let update: MenuItemUpdate = serde_json::from_str(r#"{"price":99}"#).unwrap();
        assert_eq!(update.price, Some(Decimal::from(99)));
        assert!(update.name.is_none());
        assert!(update.is_available.is_none());
    }

    #[test]
    fn test_create_accepts_both_casings() {
        let a: MenuItemCreate =
            serde_json::from_str(r#"{"name":"Plov","categoryId":1,"price":12.5}"#).unwrap();
        let b: MenuItemCreate =
            serde_json::from_str(r#"{"name":"Plov","category_id":1,"price":12.5}"#).unwrap();
        assert_eq!(a.category_id, b.category_id);
        assert!(a.is_available);
    }
}
