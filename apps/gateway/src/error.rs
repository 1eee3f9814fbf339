use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ppe_portal_core::AppError;

use crate::dto::GatewayErrorResponse;

/// HTTP error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Transport(_) | AppError::Protocol { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let payload = Json(GatewayErrorResponse {
            success: false,
            error: self.0.detail().to_owned(),
            raw: self.0.raw().map(str::to_owned),
        });

        (status, payload).into_response()
    }
}

/// Standard gateway handler result type.
pub type ApiResult<T> = Result<T, ApiError>;
