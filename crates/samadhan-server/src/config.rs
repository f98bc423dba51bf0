//! Server configuration loading from file and environment variables.

use samadhan_relay::{OpenRouterConfig, WatsonxConfig};
use samadhan_voice::ElevenLabsConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Watsonx streaming deployment used by `/chat` and as the primary
    /// response provider.
    #[serde(default)]
    pub watsonx: WatsonxConfig,

    /// OpenRouter fallback provider.
    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// ElevenLabs text-to-speech.
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "samadhan_relay=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `SAMADHAN_HOST` overrides `server.host`
/// - `SAMADHAN_PORT` overrides `server.port`
/// - `SAMADHAN_LOG_LEVEL` overrides `logging.level`
/// - `SAMADHAN_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `SAMADHAN_WATSONX_API_KEY` overrides `watsonx.api_key`
/// - `SAMADHAN_WATSONX_SCORING_URL` overrides `watsonx.scoring_url`
/// - `SAMADHAN_WATSONX_IAM_URL` overrides `watsonx.iam_url`
/// - `SAMADHAN_OPENROUTER_API_KEY` overrides `openrouter.api_key`
/// - `SAMADHAN_ELEVENLABS_API_KEY` overrides `elevenlabs.api_key`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies `SAMADHAN_*` overrides using `lookup` to read variables.
///
/// Unparseable host or port values are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("SAMADHAN_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("SAMADHAN_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = lookup("SAMADHAN_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("SAMADHAN_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(key) = lookup("SAMADHAN_WATSONX_API_KEY") {
        config.watsonx.api_key = key;
    }
    if let Some(url) = lookup("SAMADHAN_WATSONX_SCORING_URL") {
        config.watsonx.scoring_url = url;
    }
    if let Some(url) = lookup("SAMADHAN_WATSONX_IAM_URL") {
        config.watsonx.iam_url = url;
    }
    if let Some(key) = lookup("SAMADHAN_OPENROUTER_API_KEY") {
        config.openrouter.api_key = key;
    }
    if let Some(key) = lookup("SAMADHAN_ELEVENLABS_API_KEY") {
        config.elevenlabs.api_key = key;
    }
}
