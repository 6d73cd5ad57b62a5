//! Credential verification and token issuance

use shared::client::LoginRequest;
use shared::error::{AppError, AppResult};
use shared::models::{Role, User};
use shared::util::now_millis;

use super::jwt::token_ttl;
use super::password::{verify_dummy, verify_password};
use crate::core::AppState;
use crate::security_log;

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
    /// Token lifetime, reused as the cookie Max-Age
    pub max_age_secs: i64,
}

/// Landing page for a role; informational only
pub fn redirect_for(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Manager => "/manager",
        Role::Waiter => "/waiter",
        Role::Cook => "/kitchen",
        Role::Cashier => "/cashier",
    }
}

/// Verify `(username, password)` and mint a token
///
/// Unknown user, inactive user and wrong password all fail with the same
/// `INVALID_CREDENTIALS`, and each pays for one Argon2 verification.
pub async fn login(state: &AppState, req: LoginRequest) -> AppResult<LoginOutcome> {
    let username = req.username.trim();
    let password = req.password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::invalid_credentials());
    }

    let user = state.repos.users.find_by_username(username).await?;

    let user = match user {
        Some(user) => {
            let password_ok = verify_password(password, &user.password_hash);
            if !password_ok || !user.is_active() {
                security_log!(WARN, "login_failed", username = username, user_id = user.id);
                return Err(AppError::invalid_credentials());
            }
            user
        }
        None => {
            verify_dummy(password);
            security_log!(WARN, "login_failed", username = username);
            return Err(AppError::invalid_credentials());
        }
    };

    let ttl = token_ttl(req.remember);
    let token = state
        .jwt_service
        .generate_token(user.id, user.role, user.business_id, ttl)
        .map_err(|e| AppError::internal(format!("token generation failed: {e}")))?;

    if let Err(e) = state.repos.users.touch_last_active(user.id, now_millis()).await {
        tracing::warn!(user_id = user.id, error = %e, "Failed to update last_active_at");
    }

    security_log!(INFO, "login_success", user_id = user.id, role = user.role.as_str());

    Ok(LoginOutcome {
        token,
        user,
        max_age_secs: ttl.num_seconds(),
    })
}
