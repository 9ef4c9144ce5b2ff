//! HTTP surface: router construction and shared state.

mod routes;
mod tap;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;

use crate::config::AppConfig;
use crate::provider::OpenAiClient;
use crate::relay::{ChatRelay, TranscriptionRelay};
use crate::traits::{ChatCapability, TranscriptionCapability};

/// Multipart audio uploads can be several MB; raise the default extractor
/// cap without making it unbounded.
const AUDIO_UPLOAD_LIMIT_BYTES: usize = 32 * 1024 * 1024;

/// Per-process application state, cloned into each handler invocation.
///
/// The relays inside hold the only shared resource in the process, the
/// provider client handle. It is read-only after initialization, so
/// concurrent requests need no coordination.
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatRelay,
    pub voice: TranscriptionRelay,
}

impl AppState {
    /// Wire both relays to a single OpenAI-compatible client.
    pub fn new(config: &AppConfig) -> Self {
        let client = Arc::new(OpenAiClient::new(config));
        Self::with_providers(client.clone(), client)
    }

    /// Wire the relays to explicit provider handles. Tests use this seam to
    /// substitute mock capabilities.
    pub fn with_providers(
        chat: Arc<dyn ChatCapability>,
        voice: Arc<dyn TranscriptionCapability>,
    ) -> Self {
        Self {
            chat: ChatRelay::new(chat),
            voice: TranscriptionRelay::new(voice),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat/", post(routes::chat))
        .route(
            "/api/voice_to_text/",
            post(routes::voice_to_text).layer(DefaultBodyLimit::max(AUDIO_UPLOAD_LIMIT_BYTES)),
        )
        .with_state(state)
}
