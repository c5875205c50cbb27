//! # tz-prover-client — Proof Endpoint Client
//!
//! Typed access to the remote prover:
//!
//! | Method | Path | Body | 200 response |
//! |--------|------|------|--------------|
//! | POST | `/api/zkpassport/generate-proof` | `{ nationality, documentNumber, dateOfBirth }` | `{ proof, publicInputs }` |
//!
//! Non-2xx responses carry `{ error }`; that string reaches the user
//! verbatim. Requests are sent once. The client-level timeout comes from
//! [`ProverConfig`] and there is no retry layer.

pub mod client;
pub mod config;
pub mod error;

pub use client::HttpProofGenerator;
pub use config::{ConfigError, ProverConfig};
pub use error::ProverError;
