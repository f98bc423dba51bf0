use crate::error::RelayError;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Grant type for exchanging an IBM Cloud API key for an IAM token.
const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Timeout for the token exchange request.
const TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

/// Lifetime assumed when the identity endpoint omits `expires_in`.
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Upper bound on how long a token is trusted, whatever `expires_in` says.
const MAX_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Exchanges an API key for a bearer token and caches it until shortly
/// before expiry.
///
/// The cache lock is held across the exchange, so concurrent callers that
/// find no valid token wait for a single request instead of each issuing one.
#[derive(Debug)]
pub struct TokenProvider {
    http: reqwest::Client,
    iam_url: String,
    api_key: String,
    refresh_margin: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(
        http: reqwest::Client,
        iam_url: impl Into<String>,
        api_key: impl Into<String>,
        refresh_margin: Duration,
    ) -> Self {
        Self {
            http,
            iam_url: iam_url.into(),
            api_key: api_key.into(),
            refresh_margin,
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid bearer token, contacting the identity endpoint only
    /// when the cached one is missing or due for refresh.
    pub async fn bearer(&self) -> Result<String, RelayError> {
        let mut cached = self.cached.lock().await;
        if let Some(entry) = cached.as_ref() {
            if Instant::now() < entry.refresh_at {
                return Ok(entry.token.clone());
            }
        }

        let (token, ttl) = self.exchange().await?;
        let usable = Duration::from_secs(ttl.min(MAX_TOKEN_TTL_SECS))
            .saturating_sub(self.refresh_margin);
        *cached = match Instant::now().checked_add(usable) {
            Some(refresh_at) if !usable.is_zero() => Some(CachedToken {
                token: token.clone(),
                refresh_at,
            }),
            _ => None,
        };
        Ok(token)
    }

    /// Drops the cached token so the next call performs a fresh exchange.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn exchange(&self) -> Result<(String, u64), RelayError> {
        tracing::debug!(url = %self.iam_url, "requesting IAM access token");

        let response = self
            .http
            .post(&self.iam_url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("grant_type", APIKEY_GRANT_TYPE),
                ("apikey", self.api_key.as_str()),
            ])
            .timeout(TOKEN_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "IAM token exchange rejected");
            return Err(RelayError::TokenRejected(status.as_u16()));
        }

        let body: TokenResponse = response.json().await?;
        let token = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(RelayError::TokenMissing)?;

        tracing::info!("IAM access token obtained");
        Ok((token, body.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS)))
    }
}
