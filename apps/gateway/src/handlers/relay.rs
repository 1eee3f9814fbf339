use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{Method, StatusCode};
use ppe_portal_core::AppError;
use serde_json::Value;

use crate::error::ApiResult;
use crate::state::AppState;

/// Relays one action envelope to the backend script.
///
/// Only POST is accepted, whatever the body holds. The backend's JSON reply
/// is returned unchanged with status 200.
pub async fn relay_handler(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<Value>> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed("Method not allowed".to_owned()).into());
    }

    let body = body.map_err(body_rejection)?;
    let body = std::str::from_utf8(&body)
        .map_err(|_| AppError::Validation("Invalid JSON body".to_owned()))?;
    let reply = state.relay_service.relay_body(body).await?;

    Ok(Json(reply))
}

fn body_rejection(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body too large".to_owned())
    } else {
        AppError::Validation(rejection.body_text())
    }
}
