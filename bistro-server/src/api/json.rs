//! JSON body extractor with `{"error": ...}` rejections

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use shared::error::AppError;

/// `Json<T>` whose rejections (malformed body, missing field, unknown enum
/// value, wrong content type) render as 400 `ValidationFailed`
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::validation(rejection.body_text()))
            }
        }
    }
}
