//! Observability tap for streaming response bodies.

use futures_util::StreamExt;

use crate::types::FragmentStream;

/// Debug-logs every fragment of a streaming response, yielding each one
/// unchanged: same content, same order, same count.
///
/// Only streaming bodies go through here; the non-streaming transcription
/// response never touches this path.
pub(crate) fn tap_fragments(stream: FragmentStream, route: &'static str) -> FragmentStream {
    Box::pin(stream.inspect(move |fragment| {
        tracing::debug!(route, chunk = %fragment.to_chunk(), "streaming response chunk");
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    use crate::types::StreamFragment;

    fn fragments() -> Vec<StreamFragment> {
        vec![
            StreamFragment::Content("Hello".to_string()),
            StreamFragment::Content(" world".to_string()),
            StreamFragment::Error("boom".to_string()),
        ]
    }

    #[traced_test]
    #[tokio::test]
    async fn passes_every_fragment_through_unchanged() {
        let input = fragments();
        let tapped = tap_fragments(Box::pin(futures::stream::iter(input.clone())), "chat");

        let output: Vec<_> = tapped.collect().await;
        assert_eq!(output, input);
    }

    #[traced_test]
    #[tokio::test]
    async fn logs_once_per_fragment() {
        let tapped = tap_fragments(Box::pin(futures::stream::iter(fragments())), "chat");
        let _: Vec<_> = tapped.collect().await;

        logs_assert(|lines: &[&str]| {
            let hits = lines
                .iter()
                .filter(|line| line.contains("streaming response chunk"))
                .count();
            if hits == 3 {
                Ok(())
            } else {
                Err(format!("expected 3 tap log lines, saw {hits}"))
            }
        });
    }
}
