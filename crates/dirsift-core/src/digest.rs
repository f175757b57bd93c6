//! Content digest type.

use serde::{Deserialize, Serialize};

/// BLAKE3 content digest used as a content-equality proxy.
///
/// Two files with identical bytes produce identical digests; collisions
/// are accepted as negligible-probability and not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Create a digest from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        let digest = Digest::new([0xab; 32]);
        assert_eq!(digest.to_hex().len(), 64);
        assert!(digest.to_hex().starts_with("abab"));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Digest::new([1; 32]), Digest::new([1; 32]));
        assert_ne!(Digest::new([1; 32]), Digest::new([2; 32]));
    }
}
