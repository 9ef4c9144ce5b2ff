//! OpenAI-compatible HTTP client.
//!
//! Covers the two endpoints this service relays to:
//! - `POST {base}/chat/completions` with `stream: true` (SSE)
//! - `POST {base}/audio/transcriptions` (multipart, plain-text output)
//!
//! The client is read-only after construction and cheap to clone; a single
//! instance serves every in-flight request concurrently because each call
//! issues an independent network request.

mod chat;
mod transcription;

use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};

use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    chat_model: String,
    stt_model: String,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            chat_model: config.chat_model.clone(),
            stt_model: config.stt_model.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST to `path` with bearer auth; body attached by the caller.
    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.url(path)).header(
            AUTHORIZATION,
            format!("Bearer {}", self.api_key.expose_secret()),
        )
    }
}

/// Pull the human-readable message out of an OpenAI-style error body
/// (`{"error": {"message": ...}}`), falling back to the raw text.
fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.trim().to_string())
}
