use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use flowcms_core::AppError;
use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    error: &'static str,
    details: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "Conflicting request"),
            AppError::Unauthorized(_) => {
                (StatusCode::UNAUTHORIZED, "CMS access token was rejected")
            }
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "CMS access token lacks scope"),
            AppError::Upstream(_) => (StatusCode::BAD_GATEWAY, "CMS request failed"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "request failed");
        }

        let payload = Json(ErrorResponse {
            error,
            details: self.0.to_string(),
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
