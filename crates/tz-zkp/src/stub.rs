//! # Stub KYC Verifier
//!
//! Stands in for the deployed verifier contract. Applies the rules a caller
//! can observe on-chain:
//!
//! - the zero contract address means "not deployed" and fails every call;
//! - empty or all-zero calldata is rejected;
//! - a requested level outside `1..=4` is rejected;
//! - a stored level only ever goes up.
//!
//! Transaction hashes are SHA-256 over the artifact digest, subject and
//! level, so identical submissions produce identical receipts.

use std::collections::HashMap;
use std::future::Future;

use parking_lot::Mutex;
use tz_core::{sha256_digest, KycLevel, SubjectAddress, Timestamp};

use crate::artifact::{is_zero_felt, ProofArtifact};
use crate::error::VerifyError;
use crate::traits::{KycVerifier, VerificationReceipt};

#[derive(Debug)]
pub struct StubKycVerifier {
    contract: SubjectAddress,
    levels: Mutex<HashMap<SubjectAddress, KycLevel>>,
}

impl StubKycVerifier {
    pub fn new(contract: SubjectAddress) -> Self {
        Self {
            contract,
            levels: Mutex::new(HashMap::new()),
        }
    }

    pub fn contract(&self) -> &SubjectAddress {
        &self.contract
    }

    fn ensure_configured(&self) -> Result<(), VerifyError> {
        if self.contract.is_zero() {
            return Err(VerifyError::NotConfigured);
        }
        Ok(())
    }

    fn record(
        &self,
        artifact: &ProofArtifact,
        subject: &SubjectAddress,
        level: KycLevel,
    ) -> Result<VerificationReceipt, VerifyError> {
        self.ensure_configured()?;

        let calldata = artifact.calldata();
        if calldata.is_empty() {
            return Err(VerifyError::EmptyProof);
        }
        if calldata.iter().all(|f| is_zero_felt(f)) {
            return Err(VerifyError::Rejected);
        }
        if !(KycLevel::MIN..=KycLevel::MAX).contains(&level) {
            tracing::warn!(requested = level.as_u8(), "KYC level outside the contract's tiers");
            return Err(VerifyError::Rejected);
        }

        let stored = {
            let mut levels = self.levels.lock();
            let entry = levels.entry(subject.clone()).or_insert(level);
            if level > *entry {
                *entry = level;
            }
            *entry
        };

        let tx_hash = sha256_digest(
            format!(
                "{}|{}|{}",
                artifact.digest().to_hex(),
                subject,
                level.as_u8()
            )
            .as_bytes(),
        )
        .to_prefixed_hex();

        tracing::info!(
            contract = %self.contract,
            subject = %subject,
            requested = level.as_u8(),
            stored = stored.as_u8(),
            "KYC verification recorded"
        );

        Ok(VerificationReceipt {
            tx_hash,
            subject: subject.clone(),
            level: stored,
            confirmed_at: Timestamp::now(),
        })
    }
}

impl KycVerifier for StubKycVerifier {
    fn verify_kyc(
        &self,
        artifact: ProofArtifact,
        subject: &SubjectAddress,
        level: KycLevel,
    ) -> impl Future<Output = Result<VerificationReceipt, VerifyError>> + Send {
        let result = self.record(&artifact, subject, level);
        async move { result }
    }

    fn kyc_level(
        &self,
        subject: &SubjectAddress,
    ) -> impl Future<Output = Result<KycLevel, VerifyError>> + Send {
        let result = self.ensure_configured().map(|()| {
            self.levels
                .lock()
                .get(subject)
                .copied()
                .unwrap_or(KycLevel::UNVERIFIED)
        });
        async move { result }
    }
}
