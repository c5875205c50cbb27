//! Session reports for the presentation layer.

use serde::Serialize;
use tokio::sync::watch;
use tz_core::{DocumentKind, SessionId};
use tz_state::{IdentitySummary, ScanSession, ScanStage, ScanningPhase};

/// Snapshot of a session after a transition.
///
/// Carries only non-sensitive identity data: format, nationality and the
/// masked document number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub session_id: SessionId,
    pub stage: ScanStage,
    pub phase: Option<ScanningPhase>,
    pub document: Option<DocumentKind>,
    /// OCR progress of the current attempt, 0–100.
    pub progress: u8,
    pub error: Option<String>,
    pub capture_enabled: bool,
    pub attempt: u64,
    pub identity: Option<IdentitySummary>,
    pub transitions: usize,
}

impl SessionReport {
    pub fn from_session(session: &ScanSession) -> Self {
        let state = session.state();
        Self {
            session_id: session.id(),
            stage: state.stage(),
            phase: state.phase(),
            document: session.document(),
            progress: session.progress(),
            error: session.error().map(str::to_string),
            capture_enabled: session.capture_enabled(),
            attempt: session.attempt(),
            identity: session.summary().cloned(),
            transitions: session.transition_log().len(),
        }
    }
}

/// Publishes reports on a watch channel. Late subscribers get the latest
/// report immediately.
#[derive(Debug)]
pub struct SessionReporter {
    tx: watch::Sender<SessionReport>,
}

impl SessionReporter {
    pub fn new(session: &ScanSession) -> Self {
        let (tx, _rx) = watch::channel(SessionReport::from_session(session));
        Self { tx }
    }

    /// Publish the session's current state. Unchanged reports do not wake
    /// subscribers.
    pub fn publish(&self, session: &ScanSession) {
        let report = SessionReport::from_session(session);
        self.tx.send_if_modified(|current| {
            if *current == report {
                false
            } else {
                *current = report;
                true
            }
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionReport> {
        self.tx.subscribe()
    }

    pub fn latest(&self) -> SessionReport {
        self.tx.borrow().clone()
    }
}
