//! chatbridge
//!
//! A thin backend bridging a web chat client to an OpenAI-compatible
//! chat-completion provider and a speech-to-text provider.
//!
//! Two operations, two shapes:
//!
//! - **Chat**: the conversation is forwarded upstream with `stream: true` and
//!   the reply comes back as a lazy stream of text fragments. Failures are
//!   encoded *in-band* as a single terminal `{"error": ...}` fragment; the
//!   outer HTTP status stays 200 because it is committed before the first
//!   upstream delta arrives.
//! - **Voice-to-text**: one blocking round trip. The uploaded clip is staged
//!   in a scoped temp file, submitted to the transcription endpoint, and the
//!   plain-text transcript (or a response-level error) is returned.
//!
//! Module map:
//!
//! - [`config`] — environment-driven configuration, read-only after startup
//! - [`error`] — [`error::RelayError`], the one error type for both relays
//! - [`types`] — messages, fragments, and the boundary request schemas
//! - [`traits`] — capability seams the provider client implements
//! - [`provider`] — the OpenAI-compatible HTTP client
//! - [`relay`] — the chat streaming relay and the transcription relay
//! - [`server`] — axum router, handlers, and the stream observability tap

pub mod config;
pub mod error;
pub mod provider;
pub mod relay;
pub mod server;
pub mod traits;
pub mod types;

pub use config::AppConfig;
pub use error::RelayError;
