//! Error mapping shared by the HTTP handlers.

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use samadhan_analysis::apology;
use samadhan_relay::RelayError;
use serde_json::json;
use thiserror::Error;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Relay failures surface as a generic 500 with the error text as detail.
    #[error(transparent)]
    Relay(#[from] RelayError),
    /// An assistant request body could not be read. The reply still carries
    /// the helpline apology so the client has something to show.
    #[error("unreadable request: {0}")]
    UnreadableChat(String),
    /// Speech synthesis is unavailable; the client should speak the text
    /// with its own synthesizer.
    #[error("speech unavailable: {0}")]
    SpeechUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::UnreadableChat(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": msg,
                    "response": apology(),
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                })),
            )
                .into_response(),
            ApiError::Relay(err) => {
                let error = if err.is_stream_error() {
                    "Stream Error"
                } else {
                    "Internal Server Error"
                };
                tracing::error!(error = %err, "relay request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": error, "details": err.to_string() })),
                )
                    .into_response()
            }
            ApiError::SpeechUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": msg, "fallback": "browser" })),
            )
                .into_response(),
        }
    }
}
