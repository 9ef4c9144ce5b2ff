//! Provider clients.
//!
//! One client per upstream API family. Only the OpenAI-compatible surface is
//! implemented; both capabilities of [`openai::OpenAiClient`] share a single
//! process-wide instance.

pub mod openai;

pub use openai::OpenAiClient;
