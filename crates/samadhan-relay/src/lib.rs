//! Upstream model relay for Samadhan.
//!
//! Exchanges an API key for a bearer token, opens a server-sent-event stream
//! to a Watsonx deployment, and folds the `data:` frames into one response
//! string. Also carries the OpenRouter chat-completions client used as a
//! fallback provider.
//!
//! The decoding core ([`frame`]) is a plain state machine over byte chunks
//! with no I/O, so its buffer and flush contract can be exercised directly.

pub mod config;
pub mod error;
pub mod frame;
pub mod openrouter;
pub mod stream;
pub mod token;
pub mod watsonx;

pub use config::{OpenRouterConfig, WatsonxConfig};
pub use error::RelayError;
pub use frame::{DeltaAccumulator, Frame, FrameDecoder};
pub use openrouter::OpenRouterClient;
pub use stream::accumulate_deltas;
pub use token::TokenProvider;
pub use watsonx::WatsonxClient;
