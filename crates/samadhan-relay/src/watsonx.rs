use crate::config::WatsonxConfig;
use crate::error::RelayError;
use crate::stream::accumulate_deltas;
use crate::token::TokenProvider;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Timeout for establishing upstream connections. The event stream itself is
/// not time-limited.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a Watsonx `ai_service_stream` deployment.
#[derive(Debug)]
pub struct WatsonxClient {
    http: reqwest::Client,
    tokens: TokenProvider,
    scoring_url: String,
}

impl WatsonxClient {
    /// Builds a client from configuration.
    ///
    /// Fails with [`RelayError::NotConfigured`] when the API key or the
    /// scoring URL is missing.
    pub fn new(config: &WatsonxConfig) -> Result<Self, RelayError> {
        if !config.is_configured() {
            return Err(RelayError::NotConfigured("watsonx"));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("samadhan-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let tokens = TokenProvider::new(
            http.clone(),
            config.iam_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.token_refresh_margin_secs),
        );

        Ok(Self {
            http,
            tokens,
            scoring_url: config.scoring_url.clone(),
        })
    }

    /// Forwards `payload` to the deployment and returns the concatenated
    /// text of every streamed delta.
    ///
    /// The token exchange and the streaming call run sequentially; a token
    /// failure means the streaming endpoint is never contacted.
    pub async fn complete(&self, payload: &Value) -> Result<String, RelayError> {
        let token = self.tokens.bearer().await?;

        let response = self
            .http
            .post(&self.scoring_url)
            .bearer_auth(&token)
            .header(ACCEPT, "text/event-stream")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(status = status.as_u16(), "watsonx streaming endpoint rejected request");
            if status == StatusCode::UNAUTHORIZED {
                self.tokens.invalidate().await;
            }
            return Err(RelayError::UpstreamStatus(status.as_u16()));
        }

        accumulate_deltas(response.bytes_stream()).await
    }

    /// Sends a single user message with the sampling settings used for
    /// complaint replies.
    pub async fn complete_prompt(&self, prompt: &str) -> Result<String, RelayError> {
        let payload = serde_json::json!({
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": 300,
            "temperature": 0.7,
        });
        self.complete(&payload).await
    }
}
