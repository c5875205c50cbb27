//! # tz-state — Verification Session State Machine
//!
//! A verification session moves through:
//!
//! ```text
//! SELECT_TYPE ──▶ SCANNING ──▶ GENERATING_PROOF ──▶ VERIFYING_CONTRACT ──▶ SUCCESS
//!      ▲            │  INITIALIZING_CAMERA                 │
//!      │            │  CAMERA_LIVE ◀──▶ REVIEWING_CAPTURE  │
//!      │            ▼                                      │
//!      │       CAMERA_ERROR                                │
//!      └────────────── failure (any non-terminal) ─────────┘
//! ```
//!
//! States are enum variants, not strings. Every change goes through
//! [`transition`] (or [`ScanSession::apply`]), which checks the event
//! against the current state, leaves the session untouched on rejection,
//! and appends a [`TransitionRecord`] when the state changes.
//!
//! `SUCCESS` and `CAMERA_ERROR` are terminal: no event is accepted.

pub mod error;
pub mod event;
pub mod session;
pub mod state;

pub use error::TransitionError;
pub use event::ScanEvent;
pub use session::{transition, IdentitySummary, ScanSession, TransitionRecord};
pub use state::{ScanStage, ScanState, ScanningPhase};
