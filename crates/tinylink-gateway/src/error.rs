use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tinylink_core::{CoreError, ShortenerError};
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Transport-facing error: wraps the core taxonomy and renders it as a
/// JSON body with the matching status code.
#[derive(Debug)]
pub struct ApiError(ShortenerError);

impl From<ShortenerError> for ApiError {
    fn from(err: ShortenerError) -> Self {
        Self(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(ShortenerError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ShortenerError::InvalidUrl(_) | ShortenerError::InvalidShortCode(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            ShortenerError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            ShortenerError::CodeSpaceExhausted { .. }
            | ShortenerError::IdGeneration(_)
            | ShortenerError::Store(_)
            | ShortenerError::Cache(_) => {
                // Infrastructure detail stays in the logs, not the body.
                error!(error = %self.0, "request failed with internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
