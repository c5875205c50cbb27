//! Prover client configuration.

use url::Url;
use zeroize::Zeroizing;

/// Default base URL of a locally running prover.
pub const DEFAULT_PROVER_URL: &str = "http://127.0.0.1:3001";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the proof endpoint.
///
/// `Debug` redacts the bearer token.
#[derive(Clone)]
pub struct ProverConfig {
    pub base_url: Url,
    /// Optional bearer token. Zeroed on drop.
    pub api_token: Option<Zeroizing<String>>,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ProverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProverConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProverConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `TZ_PROVER_URL` (default: `http://127.0.0.1:3001`)
    /// - `TZ_PROVER_TOKEN` (optional)
    /// - `TZ_PROVER_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ProverConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("TZ_PROVER_URL").unwrap_or_else(|| DEFAULT_PROVER_URL.to_string());
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("TZ_PROVER_URL".to_string(), e.to_string()))?;

        let api_token = lookup("TZ_PROVER_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .map(Zeroizing::new);

        let timeout_secs = match lookup("TZ_PROVER_TIMEOUT_SECS") {
            Some(raw) => parse_secs("TZ_PROVER_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            api_token,
            timeout_secs,
        })
    }

    /// Configuration pointing at `base_url` with no token (for tests and
    /// local provers).
    pub fn local(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?,
            api_token: None,
            timeout_secs: 5,
        })
    }
}

fn parse_secs(var: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidDuration(var.to_string(), raw.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid duration for {0}: {1:?} (expected a positive integer)")]
    InvalidDuration(String, String),
    #[error("prover token contains characters not allowed in an HTTP header")]
    InvalidToken,
}
