//! `POST /chat`: the raw streaming relay.
//!
//! The request body is forwarded unchanged to the Watsonx deployment and the
//! streamed deltas come back as a single response string.

use crate::api::ApiError;
use crate::AppState;
use axum::extract::{Extension, Json};
use samadhan_relay::RelayError;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct RelayResult {
    pub response: String,
}

/// Response body for `POST /chat`.
#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub results: Vec<RelayResult>,
}

/// Handler for `POST /chat`.
pub async fn chat_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<RelayResponse>, ApiError> {
    let client = state
        .watsonx
        .as_ref()
        .ok_or(RelayError::NotConfigured("watsonx"))?;

    let response = client.complete(&payload).await?;
    tracing::debug!(chars = response.chars().count(), "relay completed");

    Ok(Json(RelayResponse {
        results: vec![RelayResult { response }],
    }))
}
