//! Business (tenant) administration

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Business, BusinessCreate, BusinessStatus};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::db::Repositories;

pub async fn get(repos: &Repositories, id: i64) -> AppResult<Business> {
    repos
        .businesses
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))
}

pub async fn list_all(repos: &Repositories) -> AppResult<Vec<Business>> {
    Ok(repos.businesses.list().await?)
}

/// Admins see every business; everyone else sees their own
pub async fn list_visible(repos: &Repositories, user: &CurrentUser) -> AppResult<Vec<Business>> {
    if user.is_admin() {
        return list_all(repos).await;
    }
    match user.business_id {
        Some(id) => Ok(repos.businesses.find_by_id(id).await?.into_iter().collect()),
        None => Ok(Vec::new()),
    }
}

pub async fn create(repos: &Repositories, mut input: BusinessCreate) -> AppResult<Business> {
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(AppError::new(ErrorCode::BusinessNameRequired));
    }
    let business = repos.businesses.create(input, now_millis()).await?;
    tracing::info!(business_id = business.id, "Business created");
    Ok(business)
}

pub async fn update_status(
    repos: &Repositories,
    id: i64,
    status: BusinessStatus,
) -> AppResult<Business> {
    let business = repos
        .businesses
        .update_status(id, status, now_millis())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BusinessNotFound))?;
    tracing::info!(business_id = id, status = status.as_str(), "Business status changed");
    Ok(business)
}
