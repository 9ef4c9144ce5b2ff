//! Core data types: conversation messages, stream fragments, and the
//! boundary schemas for both endpoints.
//!
//! All of these are transient, scoped to a single request. Nothing is
//! persisted.

use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Message role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One turn of a conversation. Immutable once constructed; the ordered
/// sequence of messages is forwarded upstream exactly as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Request body of `POST /api/chat/`.
///
/// `messages` defaults to empty so an absent field and an empty list produce
/// the same validation response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequestBody {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// One unit of an incrementally-produced chat response.
///
/// A stream carries zero or more `Content` fragments followed by at most one
/// `Error` fragment; nothing ever follows an `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFragment {
    /// Non-empty text delta, forwarded in upstream emission order.
    Content(String),
    /// Terminal failure, encoded in-band because the response status has
    /// already been committed by the time the failure is observed.
    Error(String),
}

impl StreamFragment {
    /// Wire encoding: content passes through verbatim, errors serialize as a
    /// JSON object so the client can tell them apart from reply text.
    pub fn to_chunk(&self) -> String {
        match self {
            Self::Content(text) => text.clone(),
            Self::Error(message) => serde_json::json!({ "error": message }).to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Lazy, forward-only, single-consumer sequence of fragments.
///
/// The item type is deliberately not a `Result`: failure is data here, and
/// the stream terminates right after carrying it.
pub type FragmentStream = Pin<Box<dyn Stream<Item = StreamFragment> + Send>>;

/// Raw text deltas as produced by a chat provider, errors still out-of-band.
/// The chat relay folds this into a [`FragmentStream`].
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String, RelayError>> + Send>>;

/// Success body of `POST /api/voice_to_text/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transcription {
    pub transcript: String,
}

/// A fully-received audio upload: opaque bytes plus the client's filename.
#[derive(Debug, Clone)]
pub struct AudioBlob {
    pub filename: String,
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_roles_deserialize_lowercase() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"user","content":"Hello"}"#).unwrap();
        assert_eq!(msg, ChatMessage::user("Hello"));

        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"Hi"}"#).unwrap();
        assert_eq!(msg.role, MessageRole::Assistant);
    }

    #[test]
    fn absent_messages_field_reads_as_empty() {
        let body: ChatRequestBody = serde_json::from_str("{}").unwrap();
        assert!(body.messages.is_empty());
    }

    #[test]
    fn error_fragments_encode_as_json() {
        let fragment = StreamFragment::Error("API Error".to_string());
        assert_eq!(fragment.to_chunk(), r#"{"error":"API Error"}"#);
        assert!(fragment.is_error());
    }

    #[test]
    fn content_fragments_pass_through_verbatim() {
        let fragment = StreamFragment::Content("Hello tester!!".to_string());
        assert_eq!(fragment.to_chunk(), "Hello tester!!");
        assert!(!fragment.is_error());
    }
}
