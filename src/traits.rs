//! Capability seams between the relays and the provider client.
//!
//! The relays only know these traits; the concrete
//! [`OpenAiClient`](crate::provider::OpenAiClient) implements both. Tests
//! substitute counting or failing mocks at the same seam.

use std::path::Path;

use async_trait::async_trait;

use crate::error::RelayError;
use crate::types::{ChatMessage, DeltaStream};

/// Streaming chat completion.
#[async_trait]
pub trait ChatCapability: Send + Sync {
    /// Open a streaming completion for the given ordered conversation.
    ///
    /// Setup failures (connect errors, non-success status) surface as `Err`;
    /// mid-stream failures surface as `Err` items inside the returned stream.
    async fn chat_stream(&self, messages: Vec<ChatMessage>) -> Result<DeltaStream, RelayError>;
}

/// Speech-to-text on an already-staged audio file.
#[async_trait]
pub trait TranscriptionCapability: Send + Sync {
    /// Transcribe the audio file at `path` to plain text. `filename` is the
    /// client's original name, used to derive the upload's media type.
    async fn transcribe_file(&self, path: &Path, filename: &str) -> Result<String, RelayError>;
}
