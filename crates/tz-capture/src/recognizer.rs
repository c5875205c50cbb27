//! # Text Recognition
//!
//! A [`RecognizerFactory`] builds a fresh [`TextRecognizer`] for every
//! attempt. [`spawn_recognition`] moves it onto its own tokio task so the
//! caller keeps servicing events while OCR runs, and returns a
//! [`RecognitionTask`] that yields progress updates followed by exactly one
//! result.
//!
//! Dropping a `RecognitionTask` aborts the task, and the recognizer is torn
//! down with it.

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::RecognitionError;
use crate::frame::{CapturedFrame, RecognizedText};
use crate::progress::{progress_channel, ProgressSink};

/// One OCR engine instance, consumed by a single recognition run.
pub trait TextRecognizer: Send + 'static {
    fn recognize(
        self,
        frame: CapturedFrame,
        progress: ProgressSink,
    ) -> impl Future<Output = Result<RecognizedText, RecognitionError>> + Send + 'static;
}

/// Builds recognizers. Initialization failures surface as
/// [`RecognitionError::Initialization`].
pub trait RecognizerFactory: Send + Sync {
    type Recognizer: TextRecognizer;

    fn create(&self) -> Result<Self::Recognizer, RecognitionError>;
}

/// What a running recognition reports next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Progress(u8),
    Finished(Result<RecognizedText, RecognitionError>),
}

/// Handle to a spawned recognition run, tagged with the attempt it serves.
#[derive(Debug)]
pub struct RecognitionTask {
    attempt: u64,
    progress: watch::Receiver<u8>,
    progress_open: bool,
    handle: JoinHandle<Result<RecognizedText, RecognitionError>>,
    finished: bool,
}

/// Create a recognizer and run it on `frame` in a spawned task.
pub fn spawn_recognition<F: RecognizerFactory>(
    factory: &F,
    frame: CapturedFrame,
    attempt: u64,
) -> Result<RecognitionTask, RecognitionError> {
    let recognizer = factory.create()?;
    let (sink, progress) = progress_channel();
    let handle = tokio::spawn(recognizer.recognize(frame, sink));
    tracing::debug!(attempt, "recognition task spawned");
    Ok(RecognitionTask {
        attempt,
        progress,
        progress_open: true,
        handle,
        finished: false,
    })
}

impl RecognitionTask {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Wait for the next progress update or the final result.
    ///
    /// Progress is preferred when both are ready, so a subscriber sees the
    /// last percentage before the result. Calling this again after
    /// `Finished` yields `Aborted`.
    pub async fn next_event(&mut self) -> RecognitionEvent {
        if self.finished {
            return RecognitionEvent::Finished(Err(RecognitionError::Aborted(
                "result already consumed".into(),
            )));
        }
        loop {
            tokio::select! {
                biased;
                changed = self.progress.changed(), if self.progress_open => {
                    if changed.is_ok() {
                        return RecognitionEvent::Progress(*self.progress.borrow_and_update());
                    }
                    self.progress_open = false;
                }
                joined = &mut self.handle => {
                    self.finished = true;
                    let result = joined
                        .map_err(|e| RecognitionError::Aborted(e.to_string()))
                        .and_then(|r| r);
                    return RecognitionEvent::Finished(result);
                }
            }
        }
    }

    /// Stop the run. The next event reports `Aborted` unless the task had
    /// already completed.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for RecognitionTask {
    fn drop(&mut self) {
        if !self.finished {
            self.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptRecognizerFactory;

    struct Stalled;

    impl TextRecognizer for Stalled {
        fn recognize(
            self,
            _frame: CapturedFrame,
            progress: ProgressSink,
        ) -> impl Future<Output = Result<RecognizedText, RecognitionError>> + Send + 'static
        {
            async move {
                progress.report(5);
                std::future::pending::<()>().await;
                Ok(RecognizedText::default())
            }
        }
    }

    struct StalledFactory;

    impl RecognizerFactory for StalledFactory {
        type Recognizer = Stalled;

        fn create(&self) -> Result<Stalled, RecognitionError> {
            Ok(Stalled)
        }
    }

    struct BrokenFactory;

    impl RecognizerFactory for BrokenFactory {
        type Recognizer = Stalled;

        fn create(&self) -> Result<Stalled, RecognitionError> {
            Err(RecognitionError::Initialization("model files missing".into()))
        }
    }

    #[tokio::test]
    async fn test_progress_then_result() {
        let frame = CapturedFrame::new(b"line one\nline two".to_vec(), "text/plain");
        let mut task = spawn_recognition(&TranscriptRecognizerFactory, frame, 3).unwrap();
        assert_eq!(task.attempt(), 3);

        let mut seen = Vec::new();
        let text = loop {
            match task.next_event().await {
                RecognitionEvent::Progress(p) => seen.push(p),
                RecognitionEvent::Finished(result) => break result.unwrap(),
            }
        };
        assert_eq!(text.lines(), ["line one", "line two"]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{seen:?}");
        assert!(seen.iter().all(|p| *p <= 100));
    }

    #[tokio::test]
    async fn test_abort_reports_aborted() {
        let frame = CapturedFrame::new(vec![1], "image/png");
        let mut task = spawn_recognition(&StalledFactory, frame, 1).unwrap();
        assert_eq!(task.next_event().await, RecognitionEvent::Progress(5));
        task.abort();
        match task.next_event().await {
            RecognitionEvent::Finished(Err(RecognitionError::Aborted(_))) => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_initialization_failure() {
        let frame = CapturedFrame::new(vec![1], "image/png");
        let err = spawn_recognition(&BrokenFactory, frame, 1).unwrap_err();
        assert!(matches!(err, RecognitionError::Initialization(_)));
    }
}
