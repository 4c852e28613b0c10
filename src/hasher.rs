//! Reference hash adapter for the default deployment.

use crate::types::Digest;
use sha2::{Digest as _, Sha256};

/// Concatenating SHA-256: hashes the parts in order as one byte stream.
/// Matches [`crate::constant::DIGEST_WIDTH`]; any other adapter must keep
/// its own width consistent between producer and verifier.
pub fn sha256(parts: &[&[u8]]) -> Digest {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_matches_sha256_of_nothing() {
        assert_eq!(
            hex::encode(sha256(&[])),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn parts_are_concatenated_in_order() {
        assert_eq!(sha256(&[b"ab", b"c"]), sha256(&[b"a", b"bc"]));
        assert_ne!(sha256(&[b"ab", b"c"]), sha256(&[b"c", b"ab"]));
    }
}
