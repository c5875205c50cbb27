//! # tz-zkp — Proof Boundary
//!
//! Everything between a validated [`ParsedIdentity`](tz_mrz::ParsedIdentity)
//! and a recorded KYC level:
//!
//! - [`ProofRequest`]: the normalized `{ nationality, documentNumber,
//!   dateOfBirth }` payload, refused for identities that failed MRZ
//!   validation or do not match the expected formats.
//! - [`ProofArtifact`]: the `{ proof, publicInputs }` response, flattened to
//!   felt calldata for the verifier.
//! - [`ProofGenerator`] / [`KycVerifier`]: the two asynchronous network
//!   boundaries. Neither retries on its own.
//! - [`StubKycVerifier`]: an in-memory verifier with the contract's
//!   observable rules, deterministic by construction.

pub mod artifact;
pub mod error;
pub mod request;
pub mod stub;
pub mod traits;

pub use artifact::ProofArtifact;
pub use error::{ProofError, VerifyError};
pub use request::ProofRequest;
pub use stub::StubKycVerifier;
pub use traits::{KycVerifier, ProofGenerator, VerificationReceipt};
