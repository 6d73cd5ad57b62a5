//! Menu catalog
//!
//! Every lookup is bounded to one business. A dish is created under a
//! category loaded with the same business, so both always agree.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Category, CategoryCreate, CategoryWithItems, MenuItem, MenuItemCreate, MenuItemUpdate,
};
use shared::util::now_millis;

use crate::db::Repositories;
use crate::db::repository::{MenuItemChanges, NewMenuItem, RepoError};
use crate::orders::money::validate_price;

fn required_name(name: &str, what: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation(format!("{what} name is required")));
    }
    Ok(name.to_string())
}

pub async fn get_dish(repos: &Repositories, dish_id: i64, business_id: i64) -> AppResult<MenuItem> {
    repos
        .menu
        .find_item(dish_id, business_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DishNotFound))
}

/// Categories with their dishes; dishes without a known category are dropped
pub async fn list_categories_and_items(
    repos: &Repositories,
    business_id: i64,
) -> AppResult<Vec<CategoryWithItems>> {
    let categories = repos.menu.list_categories(business_id).await?;
    let items = repos.menu.list_items(business_id).await?;

    Ok(categories
        .into_iter()
        .map(|category| {
            let own = items
                .iter()
                .filter(|item| item.category_id == category.id)
                .cloned()
                .collect();
            CategoryWithItems {
                category,
                items: own,
            }
        })
        .collect())
}

pub async fn create_category(
    repos: &Repositories,
    business_id: i64,
    input: CategoryCreate,
) -> AppResult<Category> {
    let name = required_name(&input.name, "category")?;
    repos
        .menu
        .create_category(business_id, &name)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::CategoryNameExists),
            other => other.into(),
        })
}

async fn load_category(repos: &Repositories, id: i64, business_id: i64) -> AppResult<Category> {
    repos
        .menu
        .find_category(id, business_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))
}

pub async fn create_item(
    repos: &Repositories,
    business_id: i64,
    input: MenuItemCreate,
) -> AppResult<MenuItem> {
    let name = required_name(&input.name, "dish")?;
    validate_price(input.price)?;
    let category = load_category(repos, input.category_id, business_id).await?;

    let item = repos
        .menu
        .create_item(NewMenuItem {
            name,
            category_id: category.id,
            business_id: category.business_id,
            price: input.price,
            is_available: input.is_available,
            description: input.description,
            now: now_millis(),
        })
        .await?;
    tracing::info!(dish_id = item.id, business_id, "Dish created");
    Ok(item)
}

/// Partial update; existing orders keep their snapshots
pub async fn update_item(
    repos: &Repositories,
    id: i64,
    business_id: i64,
    input: MenuItemUpdate,
) -> AppResult<MenuItem> {
    let current = get_dish(repos, id, business_id).await?;

    let name = match input.name {
        Some(name) => required_name(&name, "dish")?,
        None => current.name,
    };
    let price = input.price.unwrap_or(current.price);
    validate_price(price)?;
    let category_id = match input.category_id {
        Some(category_id) if category_id != current.category_id => {
            load_category(repos, category_id, business_id).await?.id
        }
        _ => current.category_id,
    };

    let changes = MenuItemChanges {
        name,
        category_id,
        price,
        is_available: input.is_available.unwrap_or(current.is_available),
        description: input.description.or(current.description),
        now: now_millis(),
    };
    let updated = repos
        .menu
        .update_item(id, business_id, changes)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DishNotFound))?;
    tracing::info!(dish_id = id, business_id, price = %updated.price, "Dish updated");
    Ok(updated)
}
