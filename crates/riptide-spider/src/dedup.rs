//! Content-fingerprint deduplication.

use dashmap::DashSet;
use sha2::{Digest, Sha256};

/// 128-bit fingerprint of a page body (low half of its SHA-256 digest).
pub type ContentFingerprint = u128;

pub fn fingerprint(body: &[u8]) -> ContentFingerprint {
    let digest = Sha256::digest(body);
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(bytes)
}

/// Set-membership test over content fingerprints. No deletions; memory is
/// linear in distinct accepted bodies.
pub struct DedupFilter {
    seen: DashSet<ContentFingerprint>,
}

impl DedupFilter {
    pub fn new() -> Self {
        Self {
            seen: DashSet::new(),
        }
    }

    /// Returns true if this body has already been seen; otherwise records it
    /// and returns false.
    pub fn is_duplicate(&self, body: &[u8]) -> bool {
        let fp = fingerprint(body);
        !self.seen.insert(fp)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl Default for DedupFilter {
    fn default() -> Self {
        Self::new()
    }
}
