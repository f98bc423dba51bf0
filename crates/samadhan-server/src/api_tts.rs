//! Text-to-speech endpoints.
//!
//! Synthesis failures never surface as 500s: the client is told to fall back
//! to its built-in speech synthesis instead.

use crate::api::ApiError;
use crate::AppState;
use axum::{
    extract::{Extension, Json},
    http::header,
    response::{IntoResponse, Response},
};
use samadhan_types::voice::VoiceKind;
use samadhan_voice::{VoiceError, VoiceInfo};
use serde::Deserialize;
use std::sync::Arc;

/// Request body for `POST /api/tts`.
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub voice: VoiceKind,
}

fn default_language() -> String {
    "en".to_string()
}

/// Handler for `POST /api/tts`.
///
/// Returns `audio/mpeg` bytes, or 503 with `fallback: "browser"`.
pub async fn tts_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<TtsRequest>,
) -> Result<Response, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text is required".to_string()));
    }
    if !state.tts.is_configured() {
        return Err(ApiError::SpeechUnavailable(
            "ElevenLabs API key not configured".to_string(),
        ));
    }

    match state
        .tts
        .synthesize(&request.text, &request.language, request.voice)
        .await
    {
        Ok(audio) => Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response()),
        Err(VoiceError::InvalidInput(msg)) => Err(ApiError::BadRequest(msg)),
        Err(e) => {
            tracing::warn!(error = %e, "speech synthesis failed, client will use browser speech");
            Err(ApiError::SpeechUnavailable(e.to_string()))
        }
    }
}

/// Handler for `GET /api/tts/voices`. Empty when TTS is unavailable.
pub async fn voices_handler(Extension(state): Extension<Arc<AppState>>) -> Json<Vec<VoiceInfo>> {
    if !state.tts.is_configured() {
        return Json(Vec::new());
    }
    match state.tts.voices().await {
        Ok(voices) => Json(voices),
        Err(e) => {
            tracing::warn!(error = %e, "failed to list voices");
            Json(Vec::new())
        }
    }
}
