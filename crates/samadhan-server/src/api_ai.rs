//! Assistant endpoints: `POST /api/ai/chat` and `POST /api/ai/analyze`.

use crate::api::ApiError;
use crate::assistant;
use crate::AppState;
use axum::extract::{rejection::JsonRejection, Extension, Json};
use samadhan_analysis::detect_language;
use samadhan_types::{ChatTurn, ComplaintAnalysis, SYSTEM_NAME};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Request body for `POST /api/ai/chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for `POST /api/ai/chat`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub analysis: ComplaintAnalysis,
    pub timestamp: String,
    pub language: String,
    pub session_id: Uuid,
    pub system: &'static str,
}

/// Request body for `POST /api/ai/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub complaint: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Response body for `POST /api/ai/analyze`: the analysis with the
/// generated reply alongside.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub analysis: ComplaintAnalysis,
    pub ai_response: String,
    pub timestamp: String,
    pub system: &'static str,
}

/// Returns the trimmed text if it is non-blank.
fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn resolve_language(requested: Option<String>, text: &str) -> String {
    requested
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| detect_language(text).to_string())
}

/// Handler for `POST /api/ai/chat`.
///
/// Analyses the message, generates a reply through the provider chain, and
/// appends both turns to the caller's session.
pub async fn chat_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::UnreadableChat(e.body_text()))?;

    let message = required(request.message.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Message is required".to_string()))?
        .to_string();
    let session_id = request
        .session_id
        .as_deref()
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|_| ApiError::BadRequest("sessionId must be a UUID".to_string()))?;
    let language = resolve_language(request.language, &message);

    tracing::info!(
        language = %language,
        chars = message.chars().count(),
        "processing chat message"
    );

    let analysis = assistant::analyze(&state, &message, &language).await;
    let response = assistant::respond(&state, &message, &analysis, &language).await;

    let session_id = state.sessions.append(
        session_id,
        [
            ChatTurn::user(message, Some(language.clone())),
            ChatTurn::bot(response.clone(), Some(language.clone())),
        ],
    );

    Ok(Json(ChatResponse {
        response,
        analysis,
        timestamp: chrono::Utc::now().to_rfc3339(),
        language,
        session_id,
        system: SYSTEM_NAME,
    }))
}

/// Handler for `POST /api/ai/analyze`.
pub async fn analyze_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::UnreadableChat(e.body_text()))?;

    let complaint = required(request.complaint.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Complaint text is required".to_string()))?;
    let language = resolve_language(request.language.clone(), complaint);

    tracing::info!(
        language = %language,
        chars = complaint.chars().count(),
        "analyzing complaint"
    );

    let analysis = assistant::analyze(&state, complaint, &language).await;
    let ai_response = assistant::respond(&state, complaint, &analysis, &language).await;

    Ok(Json(AnalyzeResponse {
        analysis,
        ai_response,
        timestamp: chrono::Utc::now().to_rfc3339(),
        system: SYSTEM_NAME,
    }))
}
