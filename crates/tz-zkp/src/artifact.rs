//! Proof artifacts returned by the prover.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tz_core::{sha256_digest, ContentDigest};

/// `{ proof, publicInputs }` as returned by the proof endpoint.
///
/// Elements are kept as JSON values; provers emit felts either as hex
/// strings or as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofArtifact {
    pub proof: Vec<Value>,
    #[serde(default)]
    pub public_inputs: Vec<Value>,
}

impl ProofArtifact {
    pub fn new(proof: Vec<Value>, public_inputs: Vec<Value>) -> Self {
        Self {
            proof,
            public_inputs,
        }
    }

    /// Proof elements followed by public inputs, each rendered as a felt
    /// string, in the order the verifier contract reads them.
    pub fn calldata(&self) -> Vec<String> {
        self.proof
            .iter()
            .chain(self.public_inputs.iter())
            .map(felt)
            .collect()
    }

    /// SHA-256 over the comma-joined calldata. Recorded as transition
    /// evidence instead of the proof itself.
    pub fn digest(&self) -> ContentDigest {
        sha256_digest(self.calldata().join(",").as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.proof.is_empty()
    }
}

fn felt(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Whether a felt string encodes zero (`0`, `0x0`, `0x000…`).
pub fn is_zero_felt(felt: &str) -> bool {
    let digits = felt
        .strip_prefix("0x")
        .or_else(|| felt.strip_prefix("0X"))
        .unwrap_or(felt);
    digits.bytes().all(|b| b == b'0')
}
