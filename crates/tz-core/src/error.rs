//! # Error Types — Scan Error Taxonomy
//!
//! `ScanError` is the single user-visible failure type of the pipeline.
//! Every variant renders to one human-readable message that the session
//! stores and the presentation layer shows as-is.
//!
//! ## Recovery classes
//!
//! - `Camera` is terminal for the session: permission or hardware failures
//!   are resolved at the browser/OS level, never retried here.
//! - `Capture` keeps the user on the live camera view.
//! - Everything else returns the session to document-type selection.
//!
//! There is no automatic retry for any class.

use std::time::Duration;

use thiserror::Error;

/// A failure surfaced to the user during a verification session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Camera permission denied or hardware unavailable.
    #[error("camera unavailable: {0}")]
    Camera(String),

    /// No frame could be captured from the camera.
    #[error("capture failed: {0}")]
    Capture(String),

    /// The OCR engine failed to initialize or errored mid-run.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// No line of the recognized text looks like a machine-readable zone.
    #[error("no machine-readable zone detected; retry with better lighting and alignment")]
    NoMrzDetected,

    /// A machine-readable zone was found but its check digits do not match.
    #[error("machine-readable zone failed check-digit validation ({})", fields.join(", "))]
    InvalidMrzChecksum {
        /// Names of the fields whose check digit did not match.
        fields: Vec<String>,
    },

    /// Candidate lines were found but none fits a known MRZ layout.
    #[error("machine-readable zone layout not recognized: {0}")]
    UnrecognizedMrzLayout(String),

    /// The proof endpoint failed. Endpoint-supplied messages are kept verbatim.
    #[error("{0}")]
    ProofGeneration(String),

    /// The on-chain verification step failed or rejected the proof.
    #[error("on-chain verification failed: {0}")]
    Verification(String),

    /// A pipeline stage exceeded its time bound.
    #[error("{stage} timed out after {millis}ms")]
    Timeout {
        /// The stage that timed out (e.g. "proof generation").
        stage: String,
        /// The configured bound in milliseconds.
        millis: u64,
    },
}

impl ScanError {
    /// A `Timeout` for `stage` after `bound`.
    pub fn timeout(stage: impl Into<String>, bound: Duration) -> Self {
        Self::Timeout {
            stage: stage.into(),
            millis: u64::try_from(bound.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Whether the session can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Camera(_))
    }

    /// Whether this error sends the session back to document-type selection.
    pub fn returns_to_selection(&self) -> bool {
        !matches!(self, Self::Camera(_) | Self::Capture(_))
    }

    /// The message stored on the session for the presentation layer.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Rejected input to a validated newtype constructor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nationality / issuing-state codes are three characters of `A-Z` or `<`.
    #[error("invalid nationality code {0:?}: expected three characters from A-Z or '<'")]
    NationalityCode(String),

    /// Subject addresses are `0x`-prefixed felts.
    #[error("invalid subject address {0:?}: expected 0x-prefixed hex of at most 64 digits")]
    SubjectAddress(String),

    /// Requested KYC levels are tiers 1 through 4.
    #[error("invalid KYC level {0}: expected 1..=4")]
    KycLevel(u8),
}
