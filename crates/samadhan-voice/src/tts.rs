use crate::config::ElevenLabsConfig;
use crate::error::VoiceError;
use reqwest::header::ACCEPT;
use samadhan_types::voice::{VoiceKind, VoiceSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum text input size for TTS (64 KiB). Prevents resource exhaustion from
/// oversized synthesis requests.
const MAX_TTS_INPUT_BYTES: usize = 64 * 1024;

/// Timeout for a synthesis round trip.
const TTS_TIMEOUT: Duration = Duration::from_secs(60);

/// Prefix the assistant sometimes puts in front of its replies.
const SPEAKER_PREFIX: &str = "samadhan ai:";

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<VoiceInfo>,
}

/// A voice available to the configured ElevenLabs account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub voice_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

/// Removes emphasis markers and a leading "Samadhan AI:" label so they are
/// not read aloud.
pub fn clean_for_speech(text: &str) -> String {
    let text = text.replace('*', "");
    let trimmed = text.trim_start();
    let without_prefix = match trimmed.get(..SPEAKER_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(SPEAKER_PREFIX) => {
            &trimmed[SPEAKER_PREFIX.len()..]
        }
        _ => trimmed,
    };
    without_prefix.trim().to_string()
}

/// Service for generating speech from text.
#[derive(Debug, Clone)]
pub struct TtsService {
    http: reqwest::Client,
    config: ElevenLabsConfig,
}

impl TtsService {
    /// Builds the service. An unconfigured key is accepted; calls then fail
    /// with [`VoiceError::NotConfigured`].
    pub fn new(config: ElevenLabsConfig) -> Result<Self, VoiceError> {
        let http = reqwest::Client::builder().timeout(TTS_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Synthesizes speech for `text` with the persona's voice.
    ///
    /// Returns MPEG audio bytes exactly as the API sent them.
    pub async fn synthesize(
        &self,
        text: &str,
        language: &str,
        voice: VoiceKind,
    ) -> Result<Vec<u8>, VoiceError> {
        if !self.is_configured() {
            return Err(VoiceError::NotConfigured);
        }

        let text = clean_for_speech(text);
        if text.is_empty() {
            return Err(VoiceError::InvalidInput("text is empty".to_string()));
        }
        if text.len() > MAX_TTS_INPUT_BYTES {
            return Err(VoiceError::InvalidInput(format!(
                "text exceeds maximum size: {} bytes (limit: {} bytes)",
                text.len(),
                MAX_TTS_INPUT_BYTES
            )));
        }

        let voice_id = voice.voice_id();
        tracing::debug!(
            voice_id,
            language,
            chars = text.chars().count(),
            "synthesizing speech"
        );

        let response = self
            .http
            .post(format!("{}/text-to-speech/{}", self.base_url(), voice_id))
            .header(ACCEPT, "audio/mpeg")
            .header("xi-api-key", &self.config.api_key)
            .json(&SynthesisRequest {
                text: &text,
                model_id: &self.config.model_id,
                voice_settings: VoiceSettings::default(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::Tts(format!("ElevenLabs API error: {}", status)));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Lists the voices available to the account.
    pub async fn voices(&self) -> Result<Vec<VoiceInfo>, VoiceError> {
        if !self.is_configured() {
            return Err(VoiceError::NotConfigured);
        }

        let response = self
            .http
            .get(format!("{}/voices", self.base_url()))
            .header("xi-api-key", &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::Tts(format!(
                "ElevenLabs voices API error: {}",
                status
            )));
        }

        let body: VoicesResponse = response.json().await?;
        Ok(body.voices)
    }
}
