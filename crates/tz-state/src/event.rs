//! Events accepted by the session state machine.

use tz_capture::CapturedFrame;
use tz_core::{ContentDigest, DocumentKind, ScanError};

use crate::session::IdentitySummary;

#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// `SELECT_TYPE → SCANNING/INITIALIZING_CAMERA`.
    DocumentSelected(DocumentKind),
    /// `INITIALIZING_CAMERA → CAMERA_LIVE`.
    CameraReady,
    /// Any scanning phase → `CAMERA_ERROR`.
    CameraFailed(String),
    /// `CAMERA_LIVE → REVIEWING_CAPTURE`.
    FrameCaptured(CapturedFrame),
    /// Stays in `CAMERA_LIVE` with the message set.
    CaptureFailed(String),
    /// `REVIEWING_CAPTURE → CAMERA_LIVE`, frame discarded.
    Retake,
    /// `REVIEWING_CAPTURE → GENERATING_PROOF`, opening a new attempt.
    CaptureConfirmed,
    RecognitionProgress { attempt: u64, percent: u32 },
    /// MRZ validated. The frame is no longer needed.
    IdentityExtracted(IdentitySummary),
    /// `GENERATING_PROOF → VERIFYING_CONTRACT`.
    ProofReceived { evidence: ContentDigest },
    /// `VERIFYING_CONTRACT → SUCCESS`.
    VerificationConfirmed { tx_hash: String },
    /// A pipeline failure. Camera errors end the session, capture errors
    /// keep the camera live, everything else returns to `SELECT_TYPE`.
    Failed(ScanError),
}

impl ScanEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DocumentSelected(_) => "DocumentSelected",
            Self::CameraReady => "CameraReady",
            Self::CameraFailed(_) => "CameraFailed",
            Self::FrameCaptured(_) => "FrameCaptured",
            Self::CaptureFailed(_) => "CaptureFailed",
            Self::Retake => "Retake",
            Self::CaptureConfirmed => "CaptureConfirmed",
            Self::RecognitionProgress { .. } => "RecognitionProgress",
            Self::IdentityExtracted(_) => "IdentityExtracted",
            Self::ProofReceived { .. } => "ProofReceived",
            Self::VerificationConfirmed { .. } => "VerificationConfirmed",
            Self::Failed(_) => "Failed",
        }
    }
}

impl From<ScanError> for ScanEvent {
    /// Route an error to the event for its recovery class.
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::Camera(_) => Self::CameraFailed(err.user_message()),
            ScanError::Capture(_) => Self::CaptureFailed(err.user_message()),
            other => Self::Failed(other),
        }
    }
}
