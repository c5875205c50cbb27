//! Session configuration.

use std::time::Duration;

use tz_core::KycLevel;

pub const DEFAULT_STAGE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SUCCESS_DELAY_MS: u64 = 1500;

/// Time bounds and verification parameters for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub recognition_timeout: Duration,
    pub proof_timeout: Duration,
    pub verify_timeout: Duration,
    /// Pause between reaching `SUCCESS` and invoking the success callback,
    /// so the confirmation stays visible.
    pub success_delay: Duration,
    /// Level requested from the verifier.
    pub kyc_level: KycLevel,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            recognition_timeout: Duration::from_secs(DEFAULT_STAGE_TIMEOUT_SECS),
            proof_timeout: Duration::from_secs(DEFAULT_STAGE_TIMEOUT_SECS),
            verify_timeout: Duration::from_secs(DEFAULT_STAGE_TIMEOUT_SECS),
            success_delay: Duration::from_millis(DEFAULT_SUCCESS_DELAY_MS),
            kyc_level: KycLevel::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `TZ_RECOGNITION_TIMEOUT_SECS` (default: 30)
    /// - `TZ_PROVER_TIMEOUT_SECS` (default: 30)
    /// - `TZ_VERIFY_TIMEOUT_SECS` (default: 30)
    /// - `TZ_SUCCESS_DELAY_MS` (default: 1500)
    /// - `TZ_KYC_LEVEL` (default: 2)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`SessionConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let secs = |var: &str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(var) {
                Some(raw) => parse_positive(var, &raw).map(Duration::from_secs),
                None => Ok(default),
            }
        };

        let success_delay = match lookup("TZ_SUCCESS_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber("TZ_SUCCESS_DELAY_MS".into(), raw))?,
            None => defaults.success_delay,
        };

        let kyc_level = match lookup("TZ_KYC_LEVEL") {
            Some(raw) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(|n| KycLevel::new(n).ok())
                .ok_or(ConfigError::InvalidKycLevel(raw))?,
            None => defaults.kyc_level,
        };

        Ok(Self {
            recognition_timeout: secs("TZ_RECOGNITION_TIMEOUT_SECS", defaults.recognition_timeout)?,
            proof_timeout: secs("TZ_PROVER_TIMEOUT_SECS", defaults.proof_timeout)?,
            verify_timeout: secs("TZ_VERIFY_TIMEOUT_SECS", defaults.verify_timeout)?,
            success_delay,
            kyc_level,
        })
    }
}

fn parse_positive(var: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber(var.to_string(), raw.to_string())),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1:?}")]
    InvalidNumber(String, String),
    #[error("invalid TZ_KYC_LEVEL {0:?}: expected 1..=4")]
    InvalidKycLevel(String),
}
