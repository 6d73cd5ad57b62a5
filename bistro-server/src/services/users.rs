//! User administration

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Role, User, UserCreate, role_business_binding_valid};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::auth::password::hash_password;
use crate::db::Repositories;
use crate::db::repository::{NewUser, RepoError};
use crate::security_log;

/// `None` lists users of every business
pub async fn list(repos: &Repositories, business_id: Option<i64>) -> AppResult<Vec<User>> {
    Ok(repos.users.list(business_id).await?)
}

/// Create a user as `actor`
///
/// Managers create staff for their resolved business only and never admins.
/// Admins may bind any existing business.
pub async fn create(
    repos: &Repositories,
    actor: &CurrentUser,
    scope_business: Option<i64>,
    mut input: UserCreate,
) -> AppResult<User> {
    input.username = input.username.trim().to_string();
    if input.username.is_empty() {
        return Err(AppError::validation("username is required"));
    }
    if input.password.trim().is_empty() {
        return Err(AppError::validation("password is required"));
    }

    if !actor.is_admin() {
        if input.role == Role::Admin {
            security_log!(WARN, "admin_create_denied", user_id = actor.id);
            return Err(AppError::forbidden());
        }
        input.business_id = scope_business;
    }

    if !role_business_binding_valid(input.role, input.business_id) {
        return Err(AppError::new(ErrorCode::UserBusinessRequired));
    }
    if let Some(business_id) = input.business_id
        && repos.businesses.find_by_id(business_id).await?.is_none()
    {
        return Err(AppError::new(ErrorCode::BusinessNotFound));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;

    let user = repos
        .users
        .create(NewUser {
            username: input.username,
            password_hash,
            email: input.email.trim().to_string(),
            name: input.name.trim().to_string(),
            role: input.role,
            business_id: input.business_id,
            now: now_millis(),
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::UsernameExists),
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, role = user.role.as_str(), business_id = ?user.business_id, "User created");
    Ok(user)
}

/// Create an unbound admin named `username` unless that username exists
///
/// Returns whether an account was created.
pub async fn ensure_admin(repos: &Repositories, username: &str, password: &str) -> AppResult<bool> {
    if repos.users.find_by_username(username).await?.is_some() {
        return Ok(false);
    }
    let password_hash = hash_password(password)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;
    let user = repos
        .users
        .create(NewUser {
            username: username.to_string(),
            password_hash,
            email: String::new(),
            name: String::new(),
            role: Role::Admin,
            business_id: None,
            now: now_millis(),
        })
        .await?;
    security_log!(INFO, "bootstrap_admin_created", user_id = user.id);
    Ok(true)
}

/// Delete a user unless it is the actor or orders still reference it
pub async fn delete(repos: &Repositories, actor: &CurrentUser, id: i64) -> AppResult<()> {
    if actor.id == id {
        return Err(AppError::new(ErrorCode::UserCannotDeleteSelf));
    }
    if repos.users.find_by_id(id).await?.is_none() {
        return Err(AppError::new(ErrorCode::UserNotFound));
    }
    if repos.orders.count_by_waiter(id).await? > 0 {
        return Err(AppError::new(ErrorCode::UserInUse));
    }
    let deleted = repos.users.delete(id).await.map_err(|e| match e {
        RepoError::Conflict(_) => AppError::new(ErrorCode::UserInUse),
        other => other.into(),
    })?;
    if !deleted {
        return Err(AppError::new(ErrorCode::UserNotFound));
    }
    tracing::info!(user_id = id, deleted_by = actor.id, "User deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use shared::models::{Business, BusinessStatus};
    use std::sync::Arc;

    fn repos() -> Repositories {
        let store = Arc::new(MemoryStore::new());
        store.seed_business(Business {
            id: 3,
            name: "Chaikhana".into(),
            status: BusinessStatus::Active,
            phone: None,
            email: None,
            address: None,
            created_at: 0,
            updated_at: 0,
        });
        Repositories::memory(store)
    }

    fn manager() -> CurrentUser {
        CurrentUser {
            id: 7,
            role: Role::Manager,
            business_id: Some(3),
        }
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            id: 1,
            role: Role::Admin,
            business_id: None,
        }
    }

    fn input(username: &str, role: Role, business_id: Option<i64>) -> UserCreate {
        UserCreate {
            username: username.into(),
            password: "pw".into(),
            email: String::new(),
            name: String::new(),
            role,
            business_id,
        }
    }

    #[tokio::test]
    async fn test_manager_binds_staff_to_resolved_business() {
        let repos = repos();
        let user = create(&repos, &manager(), Some(3), input("bob", Role::Waiter, Some(99)))
            .await
            .unwrap();
        assert_eq!(user.business_id, Some(3));
        assert_ne!(user.password_hash, "pw");
    }

    #[tokio::test]
    async fn test_manager_cannot_create_admin() {
        let err = create(&repos(), &manager(), Some(3), input("root", Role::Admin, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }

    #[tokio::test]
    async fn test_staff_requires_business() {
        let err = create(&repos(), &admin(), None, input("bob", Role::Cook, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserBusinessRequired);
    }

    #[tokio::test]
    async fn test_unknown_business_rejected() {
        let err = create(&repos(), &admin(), None, input("bob", Role::Cook, Some(42)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessNotFound);
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let repos = repos();
        create(&repos, &admin(), None, input("bob", Role::Waiter, Some(3)))
            .await
            .unwrap();
        let err = create(&repos, &admin(), None, input(" bob ", Role::Cook, Some(3)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UsernameExists);
    }

    #[tokio::test]
    async fn test_delete_self_refused() {
        let err = delete(&repos(), &admin(), 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserCannotDeleteSelf);
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let err = delete(&repos(), &admin(), 404).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn test_ensure_admin_runs_once() {
        let repos = repos();
        assert!(ensure_admin(&repos, "root", "secret").await.unwrap());
        assert!(!ensure_admin(&repos, "root", "other").await.unwrap());

        let root = repos.users.find_by_username("root").await.unwrap().unwrap();
        assert_eq!(root.role, Role::Admin);
        assert_eq!(root.business_id, None);
    }
}
