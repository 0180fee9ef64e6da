use sha2::{Digest, Sha256};
use std::fmt;

/// Hex-encoded SHA-256 digest of some content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a fingerprint from content fed in pieces.
#[derive(Default, Clone)]
pub struct IncrementalHasher {
    hasher: Sha256,
}

impl IncrementalHasher {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Feeds raw bytes, e.g. file content read in chunks.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.hasher.update(bytes);
        self
    }

    pub fn finish(self) -> ContentHash {
        ContentHash(hex::encode(self.hasher.finalize()))
    }
}
