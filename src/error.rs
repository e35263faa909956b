//! Unified error type for the service and the upload client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bearer token missing, malformed, expired, or failing verification.
    /// Always terminal for the request; no state is mutated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller-supplied input rejected before any network or store call.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The metadata store refused or failed an operation. No retry policy
    /// is defined here.
    #[error("metadata store unavailable: {0}")]
    StoreUnavailable(String),

    /// The storage service could not mint a signed URL.
    #[error("signed-url issuer unavailable: {0}")]
    IssuerUnavailable(String),

    /// The direct-to-storage transfer failed (client side only).
    #[error("transfer failed: {0}")]
    TransferFailed(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::IssuerUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::TransferFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand to the caller. Token failures all read the same
    /// so the response does not leak which check rejected the token.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Unauthorized(_) => String::from("Unauthorized"),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::debug!("request rejected: {}", self);
        }
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}
