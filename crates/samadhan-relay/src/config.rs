use serde::{Deserialize, Serialize};
use std::fmt;

fn default_iam_url() -> String {
    "https://iam.cloud.ibm.com/identity/token".to_string()
}

fn default_token_refresh_margin_secs() -> u64 {
    300
}

fn default_openrouter_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_openrouter_model() -> String {
    "deepseek/deepseek-chat".to_string()
}

fn default_referer() -> String {
    "*".to_string()
}

/// Watsonx deployment settings.
///
/// The API key is exchanged at the IAM endpoint for a bearer token, which
/// authorizes the streaming call to `scoring_url`.
#[derive(Clone, Serialize, Deserialize)]
pub struct WatsonxConfig {
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_iam_url")]
    pub iam_url: String,
    /// Full `ai_service_stream` URL of the deployment, including `version`.
    #[serde(default)]
    pub scoring_url: String,
    /// Cached tokens are refreshed this many seconds before they expire.
    #[serde(default = "default_token_refresh_margin_secs")]
    pub token_refresh_margin_secs: u64,
}

impl Default for WatsonxConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            iam_url: default_iam_url(),
            scoring_url: String::new(),
            token_refresh_margin_secs: default_token_refresh_margin_secs(),
        }
    }
}

impl fmt::Debug for WatsonxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatsonxConfig")
            .field("api_key", &"[REDACTED]")
            .field("iam_url", &self.iam_url)
            .field("scoring_url", &self.scoring_url)
            .field("token_refresh_margin_secs", &self.token_refresh_margin_secs)
            .finish()
    }
}

impl WatsonxConfig {
    pub fn new(
        api_key: impl Into<String>,
        iam_url: impl Into<String>,
        scoring_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            iam_url: iam_url.into(),
            scoring_url: scoring_url.into(),
            token_refresh_margin_secs: default_token_refresh_margin_secs(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.scoring_url.trim().is_empty()
    }
}

/// OpenRouter chat-completions settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_openrouter_base_url")]
    pub base_url: String,
    #[serde(default = "default_openrouter_model")]
    pub model: String,
    /// Sent as `HTTP-Referer`; OpenRouter uses it for app attribution.
    #[serde(default = "default_referer")]
    pub referer: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openrouter_base_url(),
            model: default_openrouter_model(),
            referer: default_referer(),
        }
    }
}

impl fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("referer", &self.referer)
            .finish()
    }
}

impl OpenRouterConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
