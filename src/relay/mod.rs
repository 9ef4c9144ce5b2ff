//! Relays: forward a request to an external provider and adapt its response
//! shape for the HTTP layer, without adding business logic.

mod chat;
mod transcribe;

pub use chat::ChatRelay;
pub use transcribe::TranscriptionRelay;
