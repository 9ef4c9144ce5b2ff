//! Transcription relay.

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;

use crate::error::RelayError;
use crate::traits::TranscriptionCapability;
use crate::types::{AudioBlob, Transcription};

/// Stages an uploaded clip in a scoped temp file and runs one blocking
/// transcription round trip against the provider.
///
/// The temp file is owned by a [`NamedTempFile`] guard, so it is removed on
/// every exit path, early `?` returns included. All failures, local I/O and
/// provider alike, come back as `Err`; the HTTP layer maps them to a
/// response-level error. `Ok` and `Err` are mutually exclusive by
/// construction, which is the transcript/error exclusivity the endpoint
/// promises.
#[derive(Clone)]
pub struct TranscriptionRelay {
    provider: Arc<dyn TranscriptionCapability>,
}

impl TranscriptionRelay {
    pub fn new(provider: Arc<dyn TranscriptionCapability>) -> Self {
        Self { provider }
    }

    pub async fn transcribe(&self, audio: AudioBlob) -> Result<Transcription, RelayError> {
        let mut staged = NamedTempFile::new()?;
        staged.write_all(&audio.data)?;
        staged.flush()?;

        tracing::debug!(
            file = %audio.filename,
            staged = %staged.path().display(),
            bytes = audio.data.len(),
            "staged audio upload"
        );

        let transcript = self
            .provider
            .transcribe_file(staged.path(), &audio.filename)
            .await?;

        Ok(Transcription { transcript })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Records the staged path it was handed and whether the file existed at
    /// call time, then answers with a fixed result.
    struct RecordingStt {
        result: Result<String, String>,
        seen: Mutex<Option<(PathBuf, bool, Vec<u8>)>>,
    }

    impl RecordingStt {
        fn ok(transcript: &str) -> Self {
            Self {
                result: Ok(transcript.to_string()),
                seen: Mutex::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                result: Err(message.to_string()),
                seen: Mutex::new(None),
            }
        }

        fn staged_path(&self) -> PathBuf {
            self.seen.lock().unwrap().as_ref().unwrap().0.clone()
        }
    }

    #[async_trait]
    impl TranscriptionCapability for RecordingStt {
        async fn transcribe_file(
            &self,
            path: &Path,
            _filename: &str,
        ) -> Result<String, RelayError> {
            let contents = std::fs::read(path).unwrap_or_default();
            *self.seen.lock().unwrap() = Some((path.to_path_buf(), path.exists(), contents));
            self.result
                .clone()
                .map_err(|message| RelayError::api(500, message))
        }
    }

    fn blob() -> AudioBlob {
        AudioBlob {
            filename: "recording.wav".to_string(),
            data: b"RIFF....WAVEfmt fake audio".to_vec(),
        }
    }

    #[tokio::test]
    async fn success_returns_transcript_and_removes_staged_file() {
        let provider = Arc::new(RecordingStt::ok("Hello world"));
        let relay = TranscriptionRelay::new(provider.clone());

        let result = relay.transcribe(blob()).await.unwrap();
        assert_eq!(result.transcript, "Hello world");

        let (path, existed_during_call, contents) =
            provider.seen.lock().unwrap().clone().unwrap();
        assert!(existed_during_call);
        assert_eq!(contents, blob().data);
        assert!(!path.exists(), "staged file must be gone after the call");
    }

    #[tokio::test]
    async fn failure_returns_err_and_still_removes_staged_file() {
        let provider = Arc::new(RecordingStt::failing("Invalid file format"));
        let relay = TranscriptionRelay::new(provider.clone());

        let err = relay.transcribe(blob()).await.unwrap_err();
        assert!(err.to_string().contains("Invalid file format"));

        assert!(!provider.staged_path().exists());
    }
}
