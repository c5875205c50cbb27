//! Client for `POST /api/zkpassport/generate-proof`.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tz_zkp::{ProofArtifact, ProofError, ProofGenerator, ProofRequest};
use url::Url;

use crate::config::{ConfigError, ProverConfig};
use crate::error::ProverError;

const GENERATE_PROOF_PATH: &str = "api/zkpassport/generate-proof";
const ENDPOINT: &str = "POST /api/zkpassport/generate-proof";

/// Error body returned by the prover on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`ProofGenerator`] backed by the remote proof endpoint.
#[derive(Debug, Clone)]
pub struct HttpProofGenerator {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpProofGenerator {
    pub fn new(config: ProverConfig) -> Result<Self, ProverError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|_| ConfigError::InvalidToken)?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ProverError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/{GENERATE_PROOF_PATH}",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    /// Request a proof.
    ///
    /// Calls `POST {base_url}/api/zkpassport/generate-proof` exactly once.
    pub async fn generate(&self, request: &ProofRequest) -> Result<ProofArtifact, ProverError> {
        tracing::info!(
            nationality = %request.nationality,
            document = %request.masked_document_number(),
            "requesting proof"
        );

        let resp = self
            .http
            .post(self.url())
            .json(request)
            .send()
            .await
            .map_err(|e| ProverError::Http {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let (message, structured) = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => (parsed.error, true),
                Err(_) => (body, false),
            };
            tracing::warn!(status, structured, "proof endpoint returned an error");
            return Err(ProverError::Api {
                endpoint: ENDPOINT.into(),
                status,
                message,
                structured,
            });
        }

        let artifact: ProofArtifact =
            resp.json().await.map_err(|e| ProverError::Deserialization {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;
        tracing::info!(
            elements = artifact.proof.len(),
            public_inputs = artifact.public_inputs.len(),
            "proof received"
        );
        Ok(artifact)
    }
}

impl ProofGenerator for HttpProofGenerator {
    fn generate_proof(
        &self,
        request: &ProofRequest,
    ) -> impl Future<Output = Result<ProofArtifact, ProofError>> + Send {
        async move { self.generate(request).await.map_err(ProofError::from) }
    }
}
