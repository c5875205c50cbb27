//! Capture and recognition errors, with their mapping into [`ScanError`].

use thiserror::Error;
use tz_core::ScanError;

/// The camera could not be started. Terminal for the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The user or platform refused camera access.
    #[error("camera permission denied")]
    PermissionDenied,

    /// No device matches the requested constraints.
    #[error("no camera available: {0}")]
    Unavailable(String),

    /// The device was found but failed to start.
    #[error("camera hardware failure: {0}")]
    Hardware(String),
}

/// A single frame could not be taken. The camera stays live.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Capture requested before the camera reported ready, or after release.
    #[error("camera is not ready")]
    NotReady,

    /// The device delivered an empty buffer.
    #[error("captured frame is empty")]
    EmptyFrame,

    /// Reading the frame source failed.
    #[error("frame source unreadable: {0}")]
    Source(String),
}

/// The OCR engine failed to start or errored mid-run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("recognizer initialization failed: {0}")]
    Initialization(String),

    #[error("{0}")]
    Engine(String),

    /// The recognition task panicked or was cancelled.
    #[error("recognition task ended abnormally: {0}")]
    Aborted(String),
}

impl From<CameraError> for ScanError {
    fn from(err: CameraError) -> Self {
        ScanError::Camera(err.to_string())
    }
}

impl From<CaptureError> for ScanError {
    fn from(err: CaptureError) -> Self {
        ScanError::Capture(err.to_string())
    }
}

impl From<RecognitionError> for ScanError {
    fn from(err: RecognitionError) -> Self {
        ScanError::Recognition(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_error_maps_to_terminal_scan_error() {
        let scan: ScanError = CameraError::PermissionDenied.into();
        assert!(!scan.is_recoverable());
        assert_eq!(scan.to_string(), "camera unavailable: camera permission denied");
    }

    #[test]
    fn test_capture_error_keeps_camera_live() {
        let scan: ScanError = CaptureError::NotReady.into();
        assert!(scan.is_recoverable());
        assert!(!scan.returns_to_selection());
    }

    #[test]
    fn test_recognition_error_returns_to_selection() {
        let scan: ScanError = RecognitionError::Engine("worker crashed".into()).into();
        assert!(scan.returns_to_selection());
        assert_eq!(scan.to_string(), "text recognition failed: worker crashed");
    }
}
