use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("ElevenLabs API key is not configured")]
    NotConfigured,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("TTS error: {0}")]
    Tts(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
