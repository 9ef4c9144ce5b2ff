//! Error type shared by the provider client and the relays.
//!
//! Every failure path in a relay terminates in a value: the chat relay folds
//! errors into a terminal stream fragment, the transcription relay returns
//! them in its `Result`. Nothing here is ever allowed to escape a handler as
//! a panic or an unhandled fault, so the `Display` strings below are exactly
//! what clients see inside `{"error": ...}` payloads.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Transport-level failure talking to a provider.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Provider answered with a non-success status.
    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    /// Provider response could not be decoded.
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// Failure while an open stream was being consumed.
    #[error("Stream error: {0}")]
    Stream(String),

    /// Local file I/O failure (upload staging, socket binding).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing startup configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RelayError {
    /// Shorthand used when a provider rejects a request outright.
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }
}
