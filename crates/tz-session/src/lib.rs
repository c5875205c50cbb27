//! # tz-session — Verification Orchestrator
//!
//! [`VerificationOrchestrator`] owns one [`ScanSession`](tz_state::ScanSession)
//! and the four collaborators a scan needs: a camera, a recognizer factory,
//! a prover and a KYC verifier. Its async operations mirror the user's
//! actions (select a document, capture, retake, confirm, close) and drive
//! the session through the state machine in `tz-state`.
//!
//! Every accepted transition publishes a [`SessionReport`] on a
//! `tokio::sync::watch` channel; subscribers always see the latest
//! snapshot.
//!
//! ## Failure policy
//!
//! - Camera errors end the session (`CAMERA_ERROR`).
//! - Capture errors keep the camera live.
//! - Everything else returns to `SELECT_TYPE` with the message set and the
//!   camera released.
//! - Recognition, proof generation and verification are each bounded by a
//!   timeout from [`SessionConfig`]. Nothing is retried automatically.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod report;

pub use config::{ConfigError, SessionConfig};
pub use error::SessionError;
pub use orchestrator::{VerificationOrchestrator, VerificationOutcome};
pub use report::{SessionReport, SessionReporter};
pub use tz_state::IdentitySummary;
