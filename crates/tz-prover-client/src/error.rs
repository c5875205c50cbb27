//! Prover client errors.

use tz_zkp::ProofError;

/// Errors from calls to the proof endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ProverError {
    /// Transport failure, including the client timeout.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Non-2xx status. `message` is the body's `error` field when present,
    /// otherwise the raw body.
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
        /// Whether `message` came from an `{ error }` body.
        structured: bool,
    },

    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<ProverError> for ProofError {
    fn from(err: ProverError) -> Self {
        match err {
            ProverError::Api {
                message,
                structured: true,
                ..
            } => ProofError::Rejected(message),
            ProverError::Api {
                status, message, ..
            } => ProofError::Rejected(format!("proof endpoint returned {status}: {message}")),
            other => ProofError::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_message_passes_through() {
        let err = ProverError::Api {
            endpoint: "POST /api/zkpassport/generate-proof".into(),
            status: 400,
            message: "Document expired".into(),
            structured: true,
        };
        assert_eq!(ProofError::from(err).to_string(), "Document expired");
    }

    #[test]
    fn raw_body_keeps_status() {
        let err = ProverError::Api {
            endpoint: "POST /api/zkpassport/generate-proof".into(),
            status: 502,
            message: "Bad Gateway".into(),
            structured: false,
        };
        assert_eq!(
            ProofError::from(err).to_string(),
            "proof endpoint returned 502: Bad Gateway"
        );
    }
}
