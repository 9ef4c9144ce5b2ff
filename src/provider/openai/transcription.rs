//! Speech-to-text via the audio transcriptions endpoint.

use std::path::Path;

use async_trait::async_trait;

use super::{OpenAiClient, error_message_from_body};
use crate::error::RelayError;
use crate::traits::TranscriptionCapability;

#[async_trait]
impl TranscriptionCapability for OpenAiClient {
    async fn transcribe_file(&self, path: &Path, filename: &str) -> Result<String, RelayError> {
        let audio = tokio::fs::read(path).await?;

        let mime = mime_guess::from_path(filename).first_or_octet_stream();
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(filename.to_string())
            .mime_str(mime.essence_str())
            .map_err(|e| RelayError::Parse(format!("invalid media type for '{filename}': {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.stt_model.clone())
            .text("response_format", "text");

        tracing::info!(
            file = %filename,
            model = %self.stt_model,
            "submitting transcription request"
        );

        let response = self
            .post("/audio/transcriptions")
            .multipart(form)
            .send()
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(RelayError::api(
                status.as_u16(),
                error_message_from_body(&text),
            ));
        }

        Ok(text)
    }
}
