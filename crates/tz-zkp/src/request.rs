//! # Proof Request
//!
//! Payload sent to the proof endpoint. Built only from identities whose
//! check digits all matched, then normalized and format-checked:
//!
//! | field            | normalization           | accepted        |
//! |------------------|-------------------------|-----------------|
//! | `nationality`    | uppercase, trim         | `^[A-Z]{3}$`    |
//! | `documentNumber` | uppercase, keep `A-Z0-9`| 5–15 characters |
//! | `dateOfBirth`    | keep digits             | exactly 6       |
//!
//! A filler-padded nationality such as `D<<` survives extraction but is
//! refused here.

use serde::{Deserialize, Serialize};
use tz_mrz::ParsedIdentity;

use crate::error::ProofError;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRequest {
    pub nationality: String,
    pub document_number: String,
    /// `YYMMDD`.
    pub date_of_birth: String,
}

impl ProofRequest {
    /// Build a request from a validated identity.
    pub fn from_identity(identity: &ParsedIdentity) -> Result<Self, ProofError> {
        if !identity.valid {
            return Err(ProofError::UnvalidatedIdentity);
        }
        let request = Self::normalized(
            identity.nationality.as_str(),
            identity.document_number.as_str(),
            identity.date_of_birth.as_str(),
        );
        request.validate()?;
        Ok(request)
    }

    /// Apply the field normalization without validating.
    pub fn normalized(nationality: &str, document_number: &str, date_of_birth: &str) -> Self {
        Self {
            nationality: nationality.to_uppercase().trim().to_string(),
            document_number: document_number
                .to_uppercase()
                .chars()
                .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
                .collect(),
            date_of_birth: date_of_birth.chars().filter(|c| c.is_ascii_digit()).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ProofError> {
        let nationality_ok =
            self.nationality.len() == 3 && self.nationality.bytes().all(|b| b.is_ascii_uppercase());
        let dob_ok =
            self.date_of_birth.len() == 6 && self.date_of_birth.bytes().all(|b| b.is_ascii_digit());
        let doc_ok = (5..=15).contains(&self.document_number.len())
            && self
                .document_number
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if nationality_ok && dob_ok && doc_ok {
            Ok(())
        } else {
            Err(ProofError::InvalidPassportData)
        }
    }

    /// First three characters of the document number followed by `***`.
    pub fn masked_document_number(&self) -> String {
        let prefix: String = self.document_number.chars().take(3).collect();
        format!("{prefix}***")
    }
}

impl std::fmt::Debug for ProofRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofRequest")
            .field("nationality", &self.nationality)
            .field("document_number", &self.masked_document_number())
            .field("date_of_birth", &"[REDACTED]")
            .finish()
    }
}
