//! # Prover and Verifier Interfaces
//!
//! Both sit on a network boundary. Implementations must be `Send + Sync` so
//! a session can hold them behind shared references while awaiting, and
//! must not retry internally: a failed call surfaces immediately and the
//! user decides whether to scan again.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tz_core::{KycLevel, SubjectAddress, Timestamp};

use crate::artifact::ProofArtifact;
use crate::error::{ProofError, VerifyError};
use crate::request::ProofRequest;

/// Turns identity fields into a zero-knowledge proof.
pub trait ProofGenerator: Send + Sync {
    fn generate_proof(
        &self,
        request: &ProofRequest,
    ) -> impl Future<Output = Result<ProofArtifact, ProofError>> + Send;
}

/// Proof of a confirmed `verify_kyc` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReceipt {
    pub tx_hash: String,
    pub subject: SubjectAddress,
    /// Level stored for the subject after the call. Never lower than before.
    pub level: KycLevel,
    pub confirmed_at: Timestamp,
}

/// The verifier contract, conceptually
/// `verify_kyc(proof_calldata, subject_address, kyc_level) -> bool` and
/// `get_kyc_level(address) -> u8`.
pub trait KycVerifier: Send + Sync {
    /// Submit a proof. The artifact is consumed; it is not needed after
    /// confirmation or failure.
    fn verify_kyc(
        &self,
        artifact: ProofArtifact,
        subject: &SubjectAddress,
        level: KycLevel,
    ) -> impl Future<Output = Result<VerificationReceipt, VerifyError>> + Send;

    /// Stored level for an address; [`KycLevel::UNVERIFIED`] if none.
    fn kyc_level(
        &self,
        subject: &SubjectAddress,
    ) -> impl Future<Output = Result<KycLevel, VerifyError>> + Send;

    /// Whether the address holds any verified level. Query failures read as
    /// unverified.
    fn is_kyc_verified(&self, subject: &SubjectAddress) -> impl Future<Output = bool> + Send {
        async move {
            match self.kyc_level(subject).await {
                Ok(level) => level.is_verified(),
                Err(e) => {
                    tracing::warn!(error = %e, "KYC level query failed");
                    false
                }
            }
        }
    }
}
