//! Request handlers and boundary validation.
//!
//! Validation here is a presence check only: a non-empty `messages` list for
//! chat, an `audio` multipart field for voice-to-text. Role values, content
//! length, and audio codecs are deliberately not inspected.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;
use serde_json::json;

use super::AppState;
use super::tap::tap_fragments;
use crate::types::{AudioBlob, ChatRequestBody};

/// `POST /api/chat/`
///
/// Streams the model reply as raw text fragments under a `text/event-stream`
/// content type. Upstream failures surface as a single JSON `{"error"}`
/// fragment inside the 200 body, never as a response-level error: the status
/// line is long gone by the time a mid-stream failure shows up, and setup
/// failures follow the same in-band path for a uniform client contract.
pub(super) async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequestBody>,
) -> Response {
    if body.messages.is_empty() {
        tracing::warn!("chat request with no messages");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Messages are required"})),
        )
            .into_response();
    }

    tracing::info!(message_count = body.messages.len(), "processing chat request");

    let fragments = tap_fragments(state.chat.stream(body.messages), "chat");
    let chunks =
        fragments.map(|fragment| Ok::<_, std::convert::Infallible>(fragment.to_chunk()));

    let mut response = Response::new(Body::from_stream(chunks));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/event-stream; charset=utf-8"),
    );
    response
}

/// `POST /api/voice_to_text/`
///
/// Single blocking round trip: no partial results, no streaming. Unlike the
/// chat endpoint, failures here map to a real 500 because nothing has been
/// written when they are observed.
pub(super) async fn voice_to_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let audio = match read_audio_field(&mut multipart).await {
        Ok(audio) => audio,
        Err(response) => return response,
    };

    let Some(audio) = audio else {
        tracing::warn!("voice-to-text request with no audio field");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Audio file is required"})),
        )
            .into_response();
    };

    tracing::info!(
        file = %audio.filename,
        bytes = audio.data.len(),
        "processing audio upload"
    );

    match state.voice.transcribe(audio).await {
        Ok(transcription) => (StatusCode::OK, Json(transcription)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "transcription failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// Walk the multipart fields looking for one named `audio`.
///
/// A malformed multipart body reads as "no audio field"; a failure while
/// draining the field's bytes is a client transport problem and maps to 400.
async fn read_audio_field(
    multipart: &mut Multipart,
) -> Result<Option<AudioBlob>, Response> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("audio") => {
                let filename = field.file_name().unwrap_or("audio").to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::warn!(error = %e, "failed to read audio upload");
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"error": e.to_string()})),
                    )
                        .into_response()
                })?;
                return Ok(Some(AudioBlob {
                    filename,
                    data: data.to_vec(),
                }));
            }
            Ok(Some(_)) => continue,
            Ok(None) | Err(_) => return Ok(None),
        }
    }
}
