//! Business tenancy
//!
//! The middleware resolves a `business_id` per request; handlers receive it
//! through [`ResolvedBusiness`] (0 allowed, admin cross-business views) or
//! [`BusinessScope`] (must be non-zero, else 400) and pass it explicitly to
//! every repository call.

mod middleware;
pub mod resolver;

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::{AppError, ErrorCode};

pub use middleware::resolve_business;

/// Resolved business for the request; 0 means unset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBusiness(pub i64);

impl ResolvedBusiness {
    /// `None` when unset
    pub fn get(self) -> Option<i64> {
        (self.0 > 0).then_some(self.0)
    }
}

/// Non-zero business for business-scoped handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessScope(pub i64);

impl<S> FromRequestParts<S> for ResolvedBusiness
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<ResolvedBusiness>()
            .copied()
            .unwrap_or(ResolvedBusiness(0)))
    }
}

impl<S> FromRequestParts<S> for BusinessScope
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let resolved = ResolvedBusiness::from_request_parts(parts, state).await?;
        resolved
            .get()
            .map(BusinessScope)
            .ok_or_else(|| AppError::new(ErrorCode::BusinessRequired))
    }
}
