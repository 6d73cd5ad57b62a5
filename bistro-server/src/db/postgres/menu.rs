use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{Category, MenuItem};

use super::PgStore;
use crate::db::repository::{MenuItemChanges, MenuRepository, NewMenuItem, RepoResult};

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    business_id: i64,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            business_id: row.business_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    name: String,
    category_id: i64,
    business_id: i64,
    price: Decimal,
    is_available: bool,
    description: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            category_id: row.category_id,
            business_id: row.business_id,
            price: row.price,
            is_available: row.is_available,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl MenuRepository for PgStore {
    async fn list_categories(&self, business_id: i64) -> RepoResult<Vec<Category>> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT * FROM categories WHERE business_id = $1 ORDER BY name")
                .bind(business_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_category(&self, id: i64, business_id: i64) -> RepoResult<Option<Category>> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT * FROM categories WHERE id = $1 AND business_id = $2")
                .bind(id)
                .bind(business_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Category::from))
    }

    async fn create_category(&self, business_id: i64, name: &str) -> RepoResult<Category> {
        let row: CategoryRow = sqlx::query_as(
            "INSERT INTO categories (name, business_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(business_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn list_items(&self, business_id: i64) -> RepoResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> =
            sqlx::query_as("SELECT * FROM menu_items WHERE business_id = $1 ORDER BY name")
                .bind(business_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    async fn find_item(&self, id: i64, business_id: i64) -> RepoResult<Option<MenuItem>> {
        let row: Option<MenuItemRow> =
            sqlx::query_as("SELECT * FROM menu_items WHERE id = $1 AND business_id = $2")
                .bind(id)
                .bind(business_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(MenuItem::from))
    }

    async fn create_item(&self, item: NewMenuItem) -> RepoResult<MenuItem> {
        let row: MenuItemRow = sqlx::query_as(
            "INSERT INTO menu_items
                 (name, category_id, business_id, price, is_available, description,
                  created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING *",
        )
        .bind(&item.name)
        .bind(item.category_id)
        .bind(item.business_id)
        .bind(item.price)
        .bind(item.is_available)
        .bind(&item.description)
        .bind(item.now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_item(
        &self,
        id: i64,
        business_id: i64,
        changes: MenuItemChanges,
    ) -> RepoResult<Option<MenuItem>> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            "UPDATE menu_items
             SET name = $1, category_id = $2, price = $3, is_available = $4,
                 description = $5, updated_at = $6
             WHERE id = $7 AND business_id = $8
             RETURNING *",
        )
        .bind(&changes.name)
        .bind(changes.category_id)
        .bind(changes.price)
        .bind(changes.is_available)
        .bind(&changes.description)
        .bind(changes.now)
        .bind(id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(MenuItem::from))
    }
}
