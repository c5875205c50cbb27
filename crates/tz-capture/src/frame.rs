//! Frames and recognized text.

use tz_core::{sha256_digest, ContentDigest, Timestamp};

/// One still image taken from the camera.
///
/// Holds sensitive document imagery: it is never logged, and sessions drop
/// it as soon as extraction succeeds.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    bytes: Vec<u8>,
    media_type: String,
    captured_at: Timestamp,
}

impl CapturedFrame {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
            captured_at: Timestamp::now(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn captured_at(&self) -> &Timestamp {
        &self.captured_at
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content digest, safe to log in place of the frame.
    pub fn digest(&self) -> ContentDigest {
        sha256_digest(&self.bytes)
    }
}

impl std::fmt::Debug for CapturedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedFrame")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .field("captured_at", &self.captured_at)
            .finish()
    }
}

/// Ordered text lines produced by one recognition run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizedText {
    pub lines: Vec<String>,
}

impl RecognizedText {
    /// Split a block of OCR output into lines.
    pub fn from_block(block: &str) -> Self {
        Self {
            lines: block.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
