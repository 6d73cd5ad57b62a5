//! Request/response types for the HTTP API that are not entities

use serde::{Deserialize, Serialize};

use crate::models::Role;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<i64>,
}

/// Authenticated principal, returned by `/api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user_id: i64,
    pub role: Role,
    /// Business bound in the token (`None` for unbound admins)
    pub business_id: Option<i64>,
    /// Business in effect for this request after tenancy resolution (0 = unset)
    pub active_business_id: i64,
}

/// Returned by `/api/businesses/{id}/select`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSelected {
    pub business_id: i64,
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_defaults() {
        let req: LoginRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(req.username, "alice");
        assert!(req.password.is_empty());
        assert!(!req.remember);
    }

    #[test]
    fn test_login_response_omits_missing_business() {
        let resp = LoginResponse {
            token: "t".into(),
            role: Role::Admin,
            redirect: "/admin".into(),
            business_id: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("business_id").is_none());
        assert_eq!(json["role"], "admin");
    }
}
