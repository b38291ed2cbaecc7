use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

static SHA256_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\b[A-Fa-f0-9]{64}\b$").unwrap());

/// True when `s` is exactly 64 hex digits.
pub fn is_sha256_hex(s: &str) -> bool {
    SHA256_HEX.is_match(s)
}

/// Incremental digest with a hex finalizer.
pub trait StreamingDigest: Default {
    fn update(&mut self, data: &[u8]);
    fn finalize_hex(self) -> String;
}

#[derive(Default)]
pub struct Sha256Digest(Sha256);

impl StreamingDigest for Sha256Digest {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }
    fn finalize_hex(self) -> String {
        hex::encode(self.0.finalize())
    }
}

/// Per-drop hash state. Created when a drop starts, consumed on completion.
pub struct HashAccumulator<D: StreamingDigest = Sha256Digest> {
    digest: D,
    bytes: u64,
}

impl<D: StreamingDigest> Default for HashAccumulator<D> {
    fn default() -> Self {
        Self {
            digest: D::default(),
            bytes: 0,
        }
    }
}

impl<D: StreamingDigest> HashAccumulator<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.digest.update(chunk);
        self.bytes += chunk.len() as u64;
    }

    /// Bytes fed so far.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Finalize; `None` when the digest is not a well-formed 64-digit hex string.
    pub fn finalize(self) -> Option<String> {
        let hex = self.digest.finalize_hex();
        if is_sha256_hex(&hex) {
            Some(hex)
        } else {
            tracing::warn!(len = hex.len(), "digest failed hex-64 validation");
            None
        }
    }
}
