use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One utterance in a chat session, from the citizen or from the assistant.
///
/// Turns are immutable once created; sessions only ever append them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub id: Uuid,
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ChatTurn {
    /// A turn spoken by the citizen.
    pub fn user(text: impl Into<String>, language: Option<String>) -> Self {
        Self::new(text.into(), true, language)
    }

    /// A turn produced by the assistant.
    pub fn bot(text: impl Into<String>, language: Option<String>) -> Self {
        Self::new(text.into(), false, language)
    }

    fn new(text: String, is_user: bool, language: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            is_user,
            timestamp: Utc::now(),
            language,
        }
    }
}
