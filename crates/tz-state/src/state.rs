//! Session states.

use serde::{Deserialize, Serialize};

/// Top-level stage of a verification session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStage {
    /// Waiting for the user to pick passport or ID card.
    SelectType,
    /// Camera open; see [`ScanningPhase`].
    Scanning,
    /// Recognition, MRZ extraction and the proof request.
    GeneratingProof,
    /// Proof submitted to the verifier.
    VerifyingContract,
    Success,
    /// Camera denied or broken. Needs a new session.
    CameraError,
}

impl ScanStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectType => "SELECT_TYPE",
            Self::Scanning => "SCANNING",
            Self::GeneratingProof => "GENERATING_PROOF",
            Self::VerifyingContract => "VERIFYING_CONTRACT",
            Self::Success => "SUCCESS",
            Self::CameraError => "CAMERA_ERROR",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::CameraError)
    }
}

impl std::fmt::Display for ScanStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sub-state while [`ScanStage::Scanning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanningPhase {
    InitializingCamera,
    CameraLive,
    /// A frame was captured and awaits retake or confirmation.
    ReviewingCapture,
}

impl ScanningPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitializingCamera => "INITIALIZING_CAMERA",
            Self::CameraLive => "CAMERA_LIVE",
            Self::ReviewingCapture => "REVIEWING_CAPTURE",
        }
    }
}

/// Full state: stage plus scanning sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "stage", content = "phase", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanState {
    SelectType,
    Scanning(ScanningPhase),
    GeneratingProof,
    VerifyingContract,
    Success,
    CameraError,
}

impl ScanState {
    pub fn stage(&self) -> ScanStage {
        match self {
            Self::SelectType => ScanStage::SelectType,
            Self::Scanning(_) => ScanStage::Scanning,
            Self::GeneratingProof => ScanStage::GeneratingProof,
            Self::VerifyingContract => ScanStage::VerifyingContract,
            Self::Success => ScanStage::Success,
            Self::CameraError => ScanStage::CameraError,
        }
    }

    pub fn phase(&self) -> Option<ScanningPhase> {
        match self {
            Self::Scanning(phase) => Some(*phase),
            _ => None,
        }
    }

    /// `SCANNING/CAMERA_LIVE` style name, or just the stage.
    pub fn name(&self) -> String {
        match self {
            Self::Scanning(phase) => format!("{}/{}", ScanStage::Scanning.name(), phase.name()),
            other => other.stage().name().to_string(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.stage().is_terminal()
    }
}

impl std::fmt::Display for ScanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
