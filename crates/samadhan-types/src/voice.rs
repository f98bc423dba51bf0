//! Voice selection and synthesis settings.
//!
//! The assistant speaks with one of two personas. Each persona maps to a
//! fixed ElevenLabs voice id; the same ids are used for every supported
//! language because the multilingual model handles pronunciation.

use serde::{Deserialize, Serialize};

/// Which persona reads a reply aloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceKind {
    /// Professional, friendly voice used for assistant replies.
    #[default]
    Samadhan,
    /// Clear, neutral voice for prompts and confirmations.
    Assistant,
}

impl VoiceKind {
    /// ElevenLabs voice id for this persona.
    pub fn voice_id(self) -> &'static str {
        match self {
            Self::Samadhan => "21m00Tcm4TlvDq8ikWAM",
            Self::Assistant => "AZnzlk1XvdvUeBnXmlld",
        }
    }
}

/// Synthesis tuning sent with every TTS request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}
