use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use pantry_core::DomainError;

/// Request-level failure. Per-record and per-supplier problems never get
/// here; they are absorbed further down.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::Domain(DomainError::MissingData { .. }) => {
                json_error(StatusCode::BAD_REQUEST, "missing_data", message)
            }
            ApiError::Domain(DomainError::Validation(_) | DomainError::InvalidId(_)) | ApiError::Validation(_) => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", message)
            }
            ApiError::Domain(DomainError::InvariantViolation(_)) => {
                json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", message)
            }
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
