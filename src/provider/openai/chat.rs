//! Streaming chat completions over SSE.

use async_stream::stream;
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;

use super::{OpenAiClient, error_message_from_body};
use crate::error::RelayError;
use crate::traits::ChatCapability;
use crate::types::{ChatMessage, DeltaStream};

/// Extract the text delta from one chat-completion chunk payload.
///
/// Returns `None` for chunks that carry no text: role preludes, finish
/// markers, and empty deltas.
fn chunk_delta(payload: &serde_json::Value) -> Option<String> {
    let delta = payload
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()?;
    if delta.is_empty() {
        None
    } else {
        Some(delta.to_string())
    }
}

fn ensure_event_stream(headers: &reqwest::header::HeaderMap) -> Result<(), RelayError> {
    let is_sse = headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().contains("text/event-stream"))
        .unwrap_or(false);
    if is_sse {
        return Ok(());
    }

    let ct = headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("<missing>");
    Err(RelayError::Parse(format!(
        "expected 'text/event-stream' for a streaming completion, got '{ct}'"
    )))
}

#[async_trait]
impl ChatCapability for OpenAiClient {
    async fn chat_stream(&self, messages: Vec<ChatMessage>) -> Result<DeltaStream, RelayError> {
        tracing::info!(
            message_count = messages.len(),
            model = %self.chat_model,
            "opening chat completion stream"
        );

        let body = serde_json::json!({
            "model": self.chat_model,
            "messages": messages,
            "stream": true,
        });

        let response = self
            .post("/chat/completions")
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(RelayError::api(
                status.as_u16(),
                error_message_from_body(&text),
            ));
        }
        ensure_event_stream(response.headers())?;

        let mut events = response.bytes_stream().eventsource();

        let deltas = stream! {
            while let Some(event) = events.next().await {
                let event = match event {
                    Ok(ev) => ev,
                    Err(e) => {
                        yield Err(RelayError::Stream(format!("SSE stream error: {e}")));
                        return;
                    }
                };

                let data = event.data.trim();
                if data.is_empty() || data == "[DONE]" {
                    continue;
                }

                let payload: serde_json::Value = match serde_json::from_str(data) {
                    Ok(v) => v,
                    Err(e) => {
                        yield Err(RelayError::Parse(format!(
                            "invalid chat completion chunk: {e}"
                        )));
                        return;
                    }
                };

                // Providers report mid-stream failures as an error object in
                // place of a chunk.
                if payload.get("error").is_some() {
                    let message = error_message_from_body(data);
                    yield Err(RelayError::Stream(message));
                    return;
                }

                if let Some(delta) = chunk_delta(&payload) {
                    tracing::debug!(len = delta.len(), "chat delta received");
                    yield Ok(delta);
                }
            }
        };

        Ok(Box::pin(deltas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_content_delta() {
        let payload = json!({"choices": [{"index": 0, "delta": {"content": "Hello"}}]});
        assert_eq!(chunk_delta(&payload), Some("Hello".to_string()));
    }

    #[test]
    fn skips_role_prelude_and_finish_chunks() {
        let prelude = json!({"choices": [{"index": 0, "delta": {"role": "assistant"}}]});
        assert_eq!(chunk_delta(&prelude), None);

        let finish = json!({"choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]});
        assert_eq!(chunk_delta(&finish), None);
    }

    #[test]
    fn skips_empty_deltas() {
        let payload = json!({"choices": [{"index": 0, "delta": {"content": ""}}]});
        assert_eq!(chunk_delta(&payload), None);
    }

    #[test]
    fn rejects_non_sse_content_type() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().unwrap(),
        );
        assert!(ensure_event_stream(&headers).is_err());

        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "text/event-stream; charset=utf-8".parse().unwrap(),
        );
        assert!(ensure_event_stream(&headers).is_ok());
    }
}
