//! Recognizer for frames that already carry their OCR transcript.
//!
//! The frame bytes must be UTF-8 text, one recognized line per line. Used
//! by the CLI to replay captures and by tests as a deterministic engine.

use std::future::Future;

use crate::error::RecognitionError;
use crate::frame::{CapturedFrame, RecognizedText};
use crate::progress::ProgressSink;
use crate::recognizer::{RecognizerFactory, TextRecognizer};

#[derive(Debug, Default)]
pub struct TranscriptRecognizer;

impl TextRecognizer for TranscriptRecognizer {
    fn recognize(
        self,
        frame: CapturedFrame,
        progress: ProgressSink,
    ) -> impl Future<Output = Result<RecognizedText, RecognitionError>> + Send + 'static {
        async move {
            progress.report(10);
            let block = std::str::from_utf8(frame.bytes()).map_err(|e| {
                RecognitionError::Engine(format!("frame is not a text transcript: {e}"))
            })?;
            tokio::task::yield_now().await;
            progress.report(60);
            let text = RecognizedText::from_block(block);
            progress.report(100);
            tracing::debug!(lines = text.lines.len(), "transcript recognized");
            Ok(text)
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TranscriptRecognizerFactory;

impl RecognizerFactory for TranscriptRecognizerFactory {
    type Recognizer = TranscriptRecognizer;

    fn create(&self) -> Result<TranscriptRecognizer, RecognitionError> {
        Ok(TranscriptRecognizer)
    }
}
