//! JWT token service
//!
//! Mints and verifies HS256 bearer tokens carrying
//! `{user_id, role, business_id, exp}`.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

/// Default token lifetime
pub const TOKEN_TTL_HOURS: i64 = 24;
/// Token lifetime when the user asked to be remembered
pub const REMEMBER_TTL_DAYS: i64 = 30;

/// Claims stored in the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub role: Role,
    /// 0 when the user is not bound to a business
    #[serde(default)]
    pub business_id: i64,
    pub exp: i64,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),
}

/// Token lifetime for a login
pub fn token_ttl(remember: bool) -> Duration {
    if remember {
        Duration::days(REMEMBER_TTL_DAYS)
    } else {
        Duration::hours(TOKEN_TTL_HOURS)
    }
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService").finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generate a token for a user
    pub fn generate_token(
        &self,
        user_id: i64,
        role: Role,
        business_id: Option<i64>,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims {
            user_id,
            role,
            business_id: business_id.unwrap_or(0),
            exp: (Utc::now() + ttl).timestamp(),
        };
        self.encode_claims(&claims)
    }

    pub fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify signature and expiry, then decode the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Authenticated principal, placed in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub role: Role,
    /// Business bound in the token
    pub business_id: Option<i64>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id,
            role: claims.role,
            business_id: (claims.business_id > 0).then_some(claims.business_id),
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes!!";

    #[test]
    fn test_generate_and_validate() {
        let service = JwtService::new(SECRET);
        let token = service
            .generate_token(7, Role::Manager, Some(3), token_ttl(false))
            .unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.business_id, 3);
        let expected = (Utc::now() + Duration::hours(24)).timestamp();
        assert!((claims.exp - expected).abs() <= 5);
    }

    #[test]
    fn test_remember_extends_expiry() {
        let service = JwtService::new(SECRET);
        let token = service
            .generate_token(1, Role::Admin, None, token_ttl(true))
            .unwrap();
        let claims = service.validate_token(&token).unwrap();
        let expected = (Utc::now() + Duration::days(30)).timestamp();
        assert!((claims.exp - expected).abs() <= 5);
        assert_eq!(CurrentUser::from(claims).business_id, None);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new(SECRET);
        let claims = Claims {
            user_id: 1,
            role: Role::Waiter,
            business_id: 3,
            exp: Utc::now().timestamp() - 10,
        };
        let token = service.encode_claims(&claims).unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let ours = JwtService::new(SECRET);
        let theirs = JwtService::new("another-secret-that-is-32-bytes-long!!");
        let token = theirs
            .generate_token(1, Role::Admin, None, token_ttl(false))
            .unwrap();
        assert!(matches!(
            ours.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_header_is_hs256_jwt() {
        let service = JwtService::new(SECRET);
        let token = service
            .generate_token(1, Role::Cook, Some(2), token_ttl(false))
            .unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.typ.as_deref(), Some("JWT"));
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
    }
}
