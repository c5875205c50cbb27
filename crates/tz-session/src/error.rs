//! Orchestrator errors.

use thiserror::Error;
use tz_core::ScanError;
use tz_state::TransitionError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A user-visible failure. Camera and pipeline failures have already
    /// moved the session to the state the error's recovery class dictates;
    /// a capture refused outside the live camera leaves the session as it
    /// was.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The operation is not valid in the current state. Nothing changed.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("verification session is closed")]
    Closed,
}

impl SessionError {
    pub fn scan_error(&self) -> Option<&ScanError> {
        match self {
            Self::Scan(err) => Some(err),
            _ => None,
        }
    }
}
