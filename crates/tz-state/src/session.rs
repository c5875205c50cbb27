//! # Scan Session
//!
//! Mutable state of one verification session and the transition function
//! that is the only way to change it.
//!
//! ## Transition table
//!
//! | from | event | to | effect |
//! |------|-------|----|--------|
//! | SELECT_TYPE | DocumentSelected | INITIALIZING_CAMERA | document set; frame, error, summary cleared |
//! | INITIALIZING_CAMERA | CameraReady | CAMERA_LIVE | |
//! | SCANNING (any) | CameraFailed | CAMERA_ERROR | error set, frame dropped |
//! | CAMERA_LIVE | FrameCaptured | REVIEWING_CAPTURE | frame stored, error cleared |
//! | CAMERA_LIVE | CaptureFailed | CAMERA_LIVE | error set |
//! | REVIEWING_CAPTURE | Retake | CAMERA_LIVE | frame dropped |
//! | REVIEWING_CAPTURE | CaptureConfirmed | GENERATING_PROOF | attempt + 1, progress 0 |
//! | GENERATING_PROOF | RecognitionProgress | GENERATING_PROOF | progress = max(progress, min(p, 100)) |
//! | GENERATING_PROOF | IdentityExtracted | GENERATING_PROOF | frame dropped, summary stored |
//! | GENERATING_PROOF | ProofReceived | VERIFYING_CONTRACT | |
//! | VERIFYING_CONTRACT | VerificationConfirmed | SUCCESS | |
//! | non-terminal | Failed | SELECT_TYPE | error set; frame, document, summary cleared |
//!
//! `Failed` carrying a camera error behaves as `CameraFailed`, and one
//! carrying a capture error as `CaptureFailed`.

use serde::{Deserialize, Serialize};
use tz_capture::CapturedFrame;
use tz_core::{ContentDigest, DocumentKind, ScanError, SessionId, Timestamp};
use tz_mrz::{MrzFormat, ParsedIdentity};

use crate::error::TransitionError;
use crate::event::ScanEvent;
use crate::state::{ScanState, ScanningPhase};

/// Identity fields safe to show and log. Birth date and names never
/// appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySummary {
    pub format: MrzFormat,
    pub nationality: String,
    /// First three characters followed by `***`.
    pub masked_document_number: String,
}

impl IdentitySummary {
    pub fn from_identity(identity: &ParsedIdentity) -> Self {
        Self {
            format: identity.format,
            nationality: identity.nationality.as_str().to_string(),
            masked_document_number: identity.document_number.masked(),
        }
    }
}

/// One logged state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from_state: String,
    pub to_state: String,
    pub event: String,
    pub timestamp: Timestamp,
    /// Digest of the artifact that justified the change, if any.
    pub evidence_digest: Option<ContentDigest>,
    pub reason: Option<String>,
}

/// State of one verification session.
///
/// Fields are read-only from outside; use [`ScanSession::apply`] or
/// [`transition`].
#[derive(Debug, Clone)]
pub struct ScanSession {
    id: SessionId,
    created_at: Timestamp,
    state: ScanState,
    document: Option<DocumentKind>,
    frame: Option<CapturedFrame>,
    error: Option<String>,
    progress: u8,
    summary: Option<IdentitySummary>,
    attempt: u64,
    transition_log: Vec<TransitionRecord>,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `event` to a copy of `session`.
///
/// Pure: performs no I/O and leaves `session` untouched whether or not the
/// event is accepted.
pub fn transition(session: &ScanSession, event: ScanEvent) -> Result<ScanSession, TransitionError> {
    let mut next = session.clone();
    next.apply(event)?;
    Ok(next)
}

impl ScanSession {
    /// A new session waiting for document selection.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            created_at: Timestamp::now(),
            state: ScanState::SelectType,
            document: None,
            frame: None,
            error: None,
            progress: 0,
            summary: None,
            attempt: 0,
            transition_log: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn document(&self) -> Option<DocumentKind> {
        self.document
    }

    pub fn frame(&self) -> Option<&CapturedFrame> {
        self.frame.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// OCR progress of the current attempt, 0–100.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn summary(&self) -> Option<&IdentitySummary> {
        self.summary.as_ref()
    }

    /// Sequence number of the current recognition attempt. 0 before the
    /// first confirmation.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn transition_log(&self) -> &[TransitionRecord] {
        &self.transition_log
    }

    /// Capture controls are enabled only while the camera is live.
    pub fn capture_enabled(&self) -> bool {
        self.state == ScanState::Scanning(ScanningPhase::CameraLive)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Apply an event in place.
    ///
    /// The event is checked before anything is written, so a rejected event
    /// leaves the session exactly as it was.
    pub fn apply(&mut self, event: ScanEvent) -> Result<(), TransitionError> {
        if self.state.is_terminal() {
            return Err(TransitionError::Terminal {
                state: self.state.name(),
            });
        }

        let event_name = event.name();
        let from = self.state;
        let mut evidence = None;
        let mut reason = None;

        match (from, event) {
            (ScanState::SelectType, ScanEvent::DocumentSelected(kind)) => {
                self.state = ScanState::Scanning(ScanningPhase::InitializingCamera);
                self.document = Some(kind);
                self.frame = None;
                self.error = None;
                self.summary = None;
                self.progress = 0;
                reason = Some(kind.as_str().to_string());
            }
            (
                ScanState::Scanning(ScanningPhase::InitializingCamera),
                ScanEvent::CameraReady,
            ) => {
                self.state = ScanState::Scanning(ScanningPhase::CameraLive);
            }
            (ScanState::Scanning(_), ScanEvent::CameraFailed(message)) => {
                self.enter_camera_error(message.clone());
                reason = Some(message);
            }
            (
                ScanState::Scanning(ScanningPhase::CameraLive),
                ScanEvent::FrameCaptured(frame),
            ) => {
                evidence = Some(frame.digest());
                self.state = ScanState::Scanning(ScanningPhase::ReviewingCapture);
                self.frame = Some(frame);
                self.error = None;
            }
            (
                ScanState::Scanning(ScanningPhase::CameraLive),
                ScanEvent::CaptureFailed(message),
            ) => {
                self.error = Some(message.clone());
                reason = Some(message);
            }
            (ScanState::Scanning(ScanningPhase::ReviewingCapture), ScanEvent::Retake) => {
                self.state = ScanState::Scanning(ScanningPhase::CameraLive);
                self.frame = None;
                self.error = None;
            }
            (
                ScanState::Scanning(ScanningPhase::ReviewingCapture),
                ScanEvent::CaptureConfirmed,
            ) => {
                self.state = ScanState::GeneratingProof;
                self.attempt += 1;
                self.progress = 0;
                self.error = None;
            }
            (
                ScanState::GeneratingProof,
                ScanEvent::RecognitionProgress { attempt, percent },
            ) => {
                if attempt != self.attempt {
                    return Err(TransitionError::StaleAttempt {
                        current: self.attempt,
                        got: attempt,
                    });
                }
                let clamped = percent.min(100) as u8;
                self.progress = self.progress.max(clamped);
            }
            (ScanState::GeneratingProof, ScanEvent::IdentityExtracted(summary)) => {
                self.frame = None;
                self.summary = Some(summary);
            }
            (ScanState::GeneratingProof, ScanEvent::ProofReceived { evidence: digest }) => {
                self.state = ScanState::VerifyingContract;
                evidence = Some(digest);
            }
            (
                ScanState::VerifyingContract,
                ScanEvent::VerificationConfirmed { tx_hash },
            ) => {
                self.state = ScanState::Success;
                reason = Some(tx_hash);
            }
            (state, ScanEvent::Failed(err)) => match err {
                ScanError::Camera(_) if matches!(state, ScanState::Scanning(_)) => {
                    let message = err.user_message();
                    self.enter_camera_error(message.clone());
                    reason = Some(message);
                }
                ScanError::Capture(_)
                    if state == ScanState::Scanning(ScanningPhase::CameraLive) =>
                {
                    let message = err.user_message();
                    self.error = Some(message.clone());
                    reason = Some(message);
                }
                ScanError::Camera(_) | ScanError::Capture(_) => {
                    return Err(TransitionError::InvalidTransition {
                        state: state.name(),
                        event: event_name,
                    });
                }
                other => {
                    let message = other.user_message();
                    self.state = ScanState::SelectType;
                    self.error = Some(message.clone());
                    self.frame = None;
                    self.document = None;
                    self.summary = None;
                    self.progress = 0;
                    reason = Some(message);
                }
            },
            (state, _) => {
                return Err(TransitionError::InvalidTransition {
                    state: state.name(),
                    event: event_name,
                });
            }
        }

        if self.state != from || reason.is_some() {
            self.transition_log.push(TransitionRecord {
                from_state: from.name(),
                to_state: self.state.name(),
                event: event_name.to_string(),
                timestamp: Timestamp::now(),
                evidence_digest: evidence,
                reason,
            });
        }
        Ok(())
    }

    fn enter_camera_error(&mut self, message: String) {
        self.state = ScanState::CameraError;
        self.error = Some(message);
        self.frame = None;
    }
}
