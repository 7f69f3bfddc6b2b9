use crate::error::BankError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors a handler can return.
///
/// Bodies look like `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Bank(#[from] BankError),

    #[error("Invalid request")]
    InvalidRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Bank(BankError::UnknownSession(_)) => {
                (StatusCode::NOT_FOUND, "session_not_found", self.to_string())
            }
            ApiError::Bank(BankError::SessionLimit(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "session_limit",
                self.to_string(),
            ),
            ApiError::Bank(BankError::Rejected(_) | BankError::ValidationError(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_command", self.to_string())
            }
            ApiError::Bank(BankError::CsvError(_) | BankError::IoError(_)) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
