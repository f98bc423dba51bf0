use thiserror::Error;

/// Failures of the upstream model relay.
///
/// Per-frame parse failures are not represented here: they are logged and
/// skipped by the accumulator and never abort a relay.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("token endpoint returned status {0}")]
    TokenRejected(u16),

    #[error("Failed to obtain access token")]
    TokenMissing,

    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("upstream response contained no message content")]
    MissingContent,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl RelayError {
    /// True for transport failures that happened after the event stream opened.
    pub fn is_stream_error(&self) -> bool {
        matches!(self, Self::Stream(_))
    }
}
