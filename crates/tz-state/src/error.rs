//! Transition errors.

use thiserror::Error;

/// An event the current state does not accept. The session is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("event {event} is not allowed in state {state}")]
    InvalidTransition { state: String, event: &'static str },

    #[error("session is in terminal state {state}")]
    Terminal { state: String },

    /// A progress report for an attempt other than the current one.
    #[error("stale event for attempt {got} (current attempt {current})")]
    StaleAttempt { current: u64, got: u64 },
}
