//! Proof and verification errors.

use thiserror::Error;
use tz_core::ScanError;

/// Proof generation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The identity did not pass MRZ check-digit validation.
    #[error("identity has not passed MRZ validation")]
    UnvalidatedIdentity,

    /// Normalized fields do not match the prover's expected formats.
    #[error("Invalid passport data format")]
    InvalidPassportData,

    /// The prover answered with an error message, kept verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The prover could not be reached or answered unintelligibly.
    #[error("proof service unavailable: {0}")]
    Unavailable(String),
}

/// On-chain verification failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Verifier contract address not configured")]
    NotConfigured,

    #[error("proof calldata is empty")]
    EmptyProof,

    /// `verify_kyc` returned `false`.
    #[error("verifier rejected the proof")]
    Rejected,

    #[error("verifier unavailable: {0}")]
    Unavailable(String),
}

impl From<ProofError> for ScanError {
    fn from(err: ProofError) -> Self {
        ScanError::ProofGeneration(err.to_string())
    }
}

impl From<VerifyError> for ScanError {
    fn from(err: VerifyError) -> Self {
        ScanError::Verification(err.to_string())
    }
}
