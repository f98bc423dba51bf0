//! Samadhan server library logic.

pub mod api;
pub mod api_ai;
pub mod api_relay;
pub mod api_tts;
pub mod assistant;
pub mod config;
pub mod sessions;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use samadhan_relay::{
    OpenRouterClient, OpenRouterConfig, RelayError, WatsonxClient, WatsonxConfig,
};
use samadhan_types::SYSTEM_NAME;
use samadhan_voice::{ElevenLabsConfig, TtsService, VoiceError};
use serde_json::{json, Value};
use sessions::SessionStore;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Errors raised while building [`AppState`].
#[derive(Debug, Error)]
pub enum StateError {
    #[error("relay client: {0}")]
    Relay(#[from] RelayError),

    #[error("tts client: {0}")]
    Voice(#[from] VoiceError),
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Watsonx streaming client; `None` when no deployment is configured.
    pub watsonx: Option<Arc<WatsonxClient>>,
    /// OpenRouter fallback client; `None` without an API key.
    pub openrouter: Option<Arc<OpenRouterClient>>,
    /// TTS service.
    pub tts: Arc<TtsService>,
    /// Chat turns recorded by `/api/ai/chat`.
    pub sessions: SessionStore,
}

impl AppState {
    /// Builds the provider clients. Unconfigured providers are left out and
    /// the assistant skips them.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if an HTTP client cannot be constructed.
    pub fn new(
        watsonx: &WatsonxConfig,
        openrouter: &OpenRouterConfig,
        elevenlabs: ElevenLabsConfig,
    ) -> Result<Self, StateError> {
        let watsonx = if watsonx.is_configured() {
            Some(Arc::new(WatsonxClient::new(watsonx)?))
        } else {
            None
        };
        let openrouter = if openrouter.is_configured() {
            Some(Arc::new(OpenRouterClient::new(openrouter)?))
        } else {
            None
        };

        Ok(Self {
            watsonx,
            openrouter,
            tts: Arc::new(TtsService::new(elevenlabs)?),
            sessions: SessionStore::new(),
        })
    }
}

/// Maximum request body size (2 MiB). Protects against OOM from oversized payloads.
const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Health check handler.
///
/// Reports which upstream providers are configured; it does not contact them.
async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "watsonx": { "configured": state.watsonx.is_some() },
        "openrouter": { "configured": state.openrouter.is_some() },
        "elevenlabs": { "configured": state.tts.is_configured() },
    }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found", "system": SYSTEM_NAME })),
    )
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(api_relay::chat_handler))
        .route("/api/ai/chat", post(api_ai::chat_handler))
        .route("/api/ai/analyze", post(api_ai::analyze_handler))
        .route(
            "/api/sessions/{sessionId}/turns",
            get(sessions::session_turns_handler),
        )
        .route("/api/tts", post(api_tts::tts_handler))
        .route("/api/tts/voices", get(api_tts::voices_handler))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
