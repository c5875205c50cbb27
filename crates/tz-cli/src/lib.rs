//! # tz-cli — Operator CLI
//!
//! Provides the `tz` command-line interface for smoke-testing the
//! identity pipeline without a device.
//!
//! ## Subcommands
//!
//! - `tz mrz` — Parse OCR lines from a file or stdin and print the
//!   identity as JSON.
//! - `tz verify` — Run a full verification session: a still image stands
//!   in for the camera, a transcript stands in for OCR, the proof comes
//!   from the configured prover and the stub verifier records the level.
//!
//! ```bash
//! tz mrz scan.txt
//! TZ_VERIFIER_ADDRESS=0x1234 tz verify --frame scan.txt --document passport --subject 0xabc
//! ```
//!
//! Logs go to stderr; stdout carries only JSON results.

pub mod mrz;
pub mod verify;
