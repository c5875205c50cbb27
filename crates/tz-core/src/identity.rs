//! # Identity Newtypes
//!
//! Newtype wrappers for the identity attributes that flow from a scanned
//! document into a proof request, and for the on-chain subject of a KYC
//! verification.
//!
//! MRZ-derived fields (`DocumentNumber`, `MrzDate`) are pass-through: the
//! check digits already cover them and no semantic range validation is done
//! at this layer. Codes and addresses that leave the device are validated
//! at construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Unique identifier for one verification session (one modal lifetime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

/// The kind of document the user chose to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Travel passport (TD3 machine-readable zone).
    Passport,
    /// National identity card (TD1 or TD2 machine-readable zone).
    IdCard,
}

impl DocumentKind {
    /// Returns the canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::IdCard => "id_card",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-letter ICAO nationality or issuing-state code (e.g. `UTO`, `D<<`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalityCode(String);

impl NationalityCode {
    /// Validate and wrap a code. Accepts exactly three characters of `A-Z` or `<`.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        let well_formed =
            code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase() || b == b'<');
        if !well_formed {
            return Err(ValidationError::NationalityCode(code));
        }
        Ok(Self(code))
    }

    /// Wrap a code read from a machine line without validation. OCR can
    /// leave digits in the field; downstream proof requests reject those.
    pub fn from_mrz(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// Access the raw code, fillers included.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NationalityCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NationalityCode> for String {
    fn from(code: NationalityCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for NationalityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Document number as printed in the MRZ, with filler characters removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentNumber(pub String);

impl DocumentNumber {
    /// Build from a raw MRZ field, dropping `<` fillers.
    pub fn from_mrz(raw: &str) -> Self {
        Self(raw.chars().filter(|c| *c != '<').collect())
    }

    /// Access the document number.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-sensitive rendering for reports and logs: the first three
    /// characters followed by `***`.
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(3).collect();
        format!("{prefix}***")
    }
}

impl std::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `YYMMDD` date exactly as encoded in the MRZ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MrzDate(pub String);

impl MrzDate {
    /// Access the raw `YYMMDD` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MrzDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sex marker from the MRZ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    /// `<` or `X` in the MRZ.
    Unspecified,
}

impl Sex {
    /// Decode the MRZ sex character. Anything other than `M`/`F` is unspecified.
    pub fn from_mrz(c: char) -> Self {
        match c {
            'M' => Self::Male,
            'F' => Self::Female,
            _ => Self::Unspecified,
        }
    }
}

/// Starknet contract address of the account whose KYC level is being set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectAddress(String);

impl SubjectAddress {
    /// Validate and normalize (lowercase) a `0x`-prefixed felt.
    pub fn new(address: impl Into<String>) -> Result<Self, ValidationError> {
        let address = address.into();
        let digits = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"));
        match digits {
            Some(d) if !d.is_empty() && d.len() <= 64 && d.bytes().all(|b| b.is_ascii_hexdigit()) => {
                Ok(Self(format!("0x{}", d.to_ascii_lowercase())))
            }
            _ => Err(ValidationError::SubjectAddress(address)),
        }
    }

    /// Access the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the zero address (`0x0`, `0x000…`).
    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }
}

impl TryFrom<String> for SubjectAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubjectAddress> for String {
    fn from(address: SubjectAddress) -> Self {
        address.0
    }
}

impl std::str::FromStr for SubjectAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for SubjectAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// KYC tier recorded by the verifier contract.
///
/// Tiers 1 through 4 can be requested. Level 0 only appears as the stored
/// level of an address that was never verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct KycLevel(u8);

impl KycLevel {
    /// No verified identity.
    pub const UNVERIFIED: Self = Self(0);
    /// Lowest requestable tier.
    pub const MIN: Self = Self(1);
    /// Highest tier.
    pub const MAX: Self = Self(4);

    /// Validate a requested tier in `1..=4`.
    pub fn new(level: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&level) {
            return Err(ValidationError::KycLevel(level));
        }
        Ok(Self(level))
    }

    /// The raw tier as sent in contract calldata.
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Whether any verification has been recorded.
    pub fn is_verified(&self) -> bool {
        self.0 > 0
    }
}

impl Default for KycLevel {
    /// Document-based verification is tier 2.
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for KycLevel {
    type Error = ValidationError;

    /// Decode a stored level, where 0 is unverified.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == Self::UNVERIFIED.0 {
            return Ok(Self::UNVERIFIED);
        }
        Self::new(value)
    }
}

impl From<KycLevel> for u8 {
    fn from(level: KycLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for KycLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier-{}", self.0)
    }
}
