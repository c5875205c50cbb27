//! # tz-capture — Capture & Recognition Pipeline
//!
//! The boundary between a verification session and the device: a
//! [`Camera`] that yields still frames and a [`RecognizerFactory`] that
//! builds one OCR engine per attempt.
//!
//! ## Lifecycle
//!
//! - The camera is initialized once per document selection and released
//!   synchronously by its owner. `release` is idempotent.
//! - A recognizer is created for every confirmed capture, moved into a
//!   spawned task by [`spawn_recognition`], and dropped when that task
//!   ends. Aborting the task tears the engine down with it.
//! - Progress flows through a [`ProgressSink`], which clamps to 0–100 and
//!   never moves backwards.
//!
//! Two implementations ship with the crate: [`StillImageCamera`] reads a
//! frame from disk on every capture, and [`TranscriptRecognizer`] treats
//! frame bytes as already-transcribed OCR output.

pub mod camera;
pub mod error;
pub mod frame;
pub mod progress;
pub mod recognizer;
pub mod still_image;
pub mod transcript;

pub use camera::{Camera, CameraConstraints, FacingMode};
pub use error::{CameraError, CaptureError, RecognitionError};
pub use frame::{CapturedFrame, RecognizedText};
pub use progress::{progress_channel, ProgressSink};
pub use recognizer::{
    spawn_recognition, RecognitionEvent, RecognitionTask, RecognizerFactory, TextRecognizer,
};
pub use still_image::StillImageCamera;
pub use transcript::{TranscriptRecognizer, TranscriptRecognizerFactory};
