//! Core types shared by the tree, proof, and wildcard layers.

use crate::constant::DIGEST_WIDTH;
use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};

/// Output of the injected hash function.
pub type Digest = Vec<u8>;

/// A keyed sequence hash: concatenates its parts and digests the result.
/// The only injected capability of the whole structure; producer and
/// verifier must use the same function.
pub type HashFn = fn(&[&[u8]]) -> Digest;

/// Opaque leaf bytes stored in the Merkle tree. The wildcard layer encodes
/// leaves as `key_bytes || digest_of_payload`.
pub type Leaf = Vec<u8>;

/// The ordered list of data values attached to one key.
pub type Payload = Vec<Vec<u8>>;

/// Sibling digests along a root-to-leaf descent, deepest sibling first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref, From, Serialize, Deserialize)]
pub struct AuditPath(pub(crate) Vec<Digest>);

/// A wildcard answer: the matching subject keys and their payloads.
///
/// The two sequences are parallel (`subjects[i]` owns `payloads[i]`) and
/// subjects are strictly ascending in byte order. Payload digests are
/// computed as `H(p0, p1, ...)` with no separators between elements, so
/// deployments that need element boundaries must length-prefix values
/// before insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub(crate) subjects: Vec<String>,
    pub(crate) payloads: Vec<Payload>,
}

impl Answer {
    /// The matching keys, in ascending order.
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// The payload lists, parallel to [`Answer::subjects`].
    pub fn payloads(&self) -> &[Payload] {
        &self.payloads
    }

    /// Number of matches in this answer.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Whether the answer holds no matches.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Iterate over `(subject, payload)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Payload)> {
        self.subjects
            .iter()
            .map(String::as_str)
            .zip(self.payloads.iter())
    }
}

/// Key portion of a leaf: everything before the trailing payload digest.
/// Leaves shorter than the digest width are malformed and yield the empty
/// key, which can never bracket a non-empty query key.
pub fn leaf_key(leaf: &[u8]) -> &[u8] {
    match leaf.len().checked_sub(DIGEST_WIDTH) {
        Some(key_len) => &leaf[..key_len],
        None => &[],
    }
}

/// `H(p0, p1, ...)` over the payload elements, with no separators.
pub(crate) fn payload_digest(hash: HashFn, payload: &Payload) -> Digest {
    let parts: Vec<&[u8]> = payload.iter().map(Vec::as_slice).collect();
    hash(&parts)
}

/// Leaf encoding of one stored key: `key_bytes || H(payload...)`.
pub(crate) fn encode_leaf(hash: HashFn, key: &str, payload: &Payload) -> Leaf {
    let mut leaf = key.as_bytes().to_vec();
    leaf.extend_from_slice(&payload_digest(hash, payload));
    leaf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_key_splits_off_trailing_digest() {
        let mut leaf = b"moc.oof".to_vec();
        leaf.extend_from_slice(&[0xab; DIGEST_WIDTH]);
        assert_eq!(leaf_key(&leaf), b"moc.oof");
    }

    #[test]
    fn leaf_key_of_bare_digest_is_empty() {
        assert_eq!(leaf_key(&[0xab; DIGEST_WIDTH]), b"");
    }

    #[test]
    fn leaf_key_of_short_leaf_is_empty() {
        assert_eq!(leaf_key(b"too short"), b"");
    }

    #[test]
    fn answer_pairs_subjects_with_payloads() {
        let answer = Answer {
            subjects: vec!["a".into(), "b".into()],
            payloads: vec![vec![b"pa".to_vec()], vec![b"pb".to_vec()]],
        };
        assert_eq!(answer.len(), 2);
        let pairs: Vec<_> = answer.iter().collect();
        assert_eq!(pairs[0].0, "a");
        assert_eq!(pairs[1].1[0], b"pb");
    }
}
