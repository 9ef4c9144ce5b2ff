//! Chat streaming relay.

use std::sync::Arc;

use async_stream::stream;
use futures_util::StreamExt;

use crate::traits::ChatCapability;
use crate::types::{ChatMessage, FragmentStream, StreamFragment};

/// Forwards a conversation to the chat provider and exposes the reply as a
/// lazy fragment stream.
///
/// Failures never escape as errors: whether the upstream call fails during
/// setup or mid-stream, the stream carries exactly one terminal
/// [`StreamFragment::Error`] and ends. By then the transport has already
/// committed to a success status, so in-band data is the only channel left.
#[derive(Clone)]
pub struct ChatRelay {
    provider: Arc<dyn ChatCapability>,
}

impl ChatRelay {
    pub fn new(provider: Arc<dyn ChatCapability>) -> Self {
        Self { provider }
    }

    /// Produce the fragment stream for one conversation.
    ///
    /// Callers validate that `messages` is non-empty before invoking this;
    /// no re-validation happens here. The stream is pull-driven: the
    /// upstream call is only made once the consumer starts polling, and a
    /// consumer that stops polling stops production at the next suspension
    /// point.
    pub fn stream(&self, messages: Vec<ChatMessage>) -> FragmentStream {
        let provider = Arc::clone(&self.provider);

        let fragments = stream! {
            let mut deltas = match provider.chat_stream(messages).await {
                Ok(deltas) => deltas,
                Err(e) => {
                    tracing::error!(error = %e, "chat stream setup failed");
                    yield StreamFragment::Error(e.to_string());
                    return;
                }
            };

            while let Some(item) = deltas.next().await {
                match item {
                    Ok(delta) => yield StreamFragment::Content(delta),
                    Err(e) => {
                        tracing::error!(error = %e, "chat stream failed mid-flight");
                        yield StreamFragment::Error(e.to_string());
                        return;
                    }
                }
            }
        };

        Box::pin(fragments)
    }
}
