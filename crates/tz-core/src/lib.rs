//! # tz-core — Foundational Types for the Treazury Identity Pipeline
//!
//! Every other `tz-*` crate depends on this one; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for identity fields.** `NationalityCode`, `DocumentNumber`,
//!    `MrzDate`, `SubjectAddress`, `KycLevel`. No bare strings cross crate
//!    boundaries.
//!
//! 2. **One user-visible error taxonomy.** `ScanError` is the only error the
//!    presentation layer sees. Crate-local errors convert into it.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is UTC, truncated to seconds.
//!
//! 4. **Digests are SHA-256 over serialized bytes.** `ContentDigest` is the
//!    evidence type recorded in session transition logs.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tz-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

pub use digest::{sha256_digest, ContentDigest};
pub use error::{ScanError, ValidationError};
pub use identity::{
    DocumentKind, DocumentNumber, KycLevel, MrzDate, NationalityCode, SessionId, Sex,
    SubjectAddress,
};
pub use temporal::Timestamp;
