//! Environment-driven configuration.
//!
//! Read once at startup; every field is immutable afterwards. The API key
//! lives in a [`SecretString`] so it never shows up in debug output.

use std::net::SocketAddr;

use secrecy::SecretString;

use crate::error::RelayError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_STT_MODEL: &str = "whisper-1";
const DEFAULT_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer token for the provider, required.
    pub api_key: SecretString,
    /// Base URL of the OpenAI-compatible API, without a trailing slash.
    pub base_url: String,
    /// Model used for chat completions.
    pub chat_model: String,
    /// Model used for audio transcription.
    pub stt_model: String,
    /// Address the HTTP server binds to.
    pub addr: SocketAddr,
}

impl AppConfig {
    /// Build the configuration from process environment variables.
    ///
    /// `OPENAI_API_KEY` is mandatory; everything else falls back to the
    /// defaults above.
    pub fn from_env() -> Result<Self, RelayError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| RelayError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let addr = env_or("CHATBRIDGE_ADDR", DEFAULT_ADDR)
            .parse()
            .map_err(|e| RelayError::Config(format!("invalid CHATBRIDGE_ADDR: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            chat_model: env_or("CHATBRIDGE_CHAT_MODEL", DEFAULT_CHAT_MODEL),
            stt_model: env_or("CHATBRIDGE_STT_MODEL", DEFAULT_STT_MODEL),
            addr,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
