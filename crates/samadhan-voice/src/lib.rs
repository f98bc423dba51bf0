//! Speech synthesis for Samadhan replies.
//!
//! Wraps the ElevenLabs text-to-speech REST API. When no API key is
//! configured, or the API fails, callers get a [`VoiceError`] and are
//! expected to tell the client to fall back to its built-in speech
//! synthesis.

pub mod config;
pub mod error;
pub mod tts;

pub use config::ElevenLabsConfig;
pub use error::VoiceError;
pub use tts::{clean_for_speech, TtsService, VoiceInfo};
