//! The wildcard proof object and its verification predicate.

use crate::constant::{INTERIOR_TAG, LEAF_TAG};
use crate::tree::MerkleTree;
use crate::types::{encode_leaf, leaf_key, Answer, AuditPath, HashFn, Leaf};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

fn default_hash() -> HashFn {
    crate::hasher::sha256
}

/// Proof that a wildcard [`Answer`] is both authentic and complete.
///
/// The proof is self-contained: it carries the hash function and tree-wide
/// constant so verification needs nothing beyond the query key, the answer,
/// the number of stored keys, and a trusted snapshot. Serialized proofs omit
/// the hash function; deserialization restores the SHA-256 reference
/// adapter, so deployments with a custom hash must substitute it themselves.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proof {
    /// Hash function of the Merkle tree the proof was produced against.
    #[serde(skip, default = "default_hash")]
    pub(crate) hash: HashFn,
    /// Tree-wide constant of that tree.
    pub(crate) twc: Vec<u8>,
    /// Leaf position of the left bracket when one is present, otherwise of
    /// the first match (or of the sort position for a miss). `None` only for
    /// an empty tree.
    pub(crate) index: Option<usize>,
    /// Raw bytes of the leaf just left of the match range, absent when the
    /// range starts at leaf 0.
    pub(crate) ll: Option<Leaf>,
    /// Raw bytes of the leaf just right of the match range, absent when the
    /// range ends at the last leaf.
    pub(crate) rl: Option<Leaf>,
    /// Audit path to the left bracket leaf.
    pub(crate) lap: Option<AuditPath>,
    /// Audit path to the right bracket leaf.
    pub(crate) rap: Option<AuditPath>,
}

impl Proof {
    /// Leaf position this proof anchors the reconstructed range at.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The left bracket leaf, if the range does not start at leaf 0.
    pub fn left_bracket(&self) -> Option<&Leaf> {
        self.ll.as_ref()
    }

    /// The right bracket leaf, if the range does not end at the last leaf.
    pub fn right_bracket(&self) -> Option<&Leaf> {
        self.rl.as_ref()
    }

    /// Checks that `answer` is the authentic and complete response for
    /// `key` against a tree of `size` keys committed to by `snapshot`.
    ///
    /// Every failure reason (a missing bracket, a bracket that does not
    /// enclose the key, unordered or mismatched leaves, a malformed range
    /// proof, a digest mismatch) collapses into `false`.
    pub fn verify(&self, key: &str, answer: &Answer, size: usize, snapshot: &[u8]) -> bool {
        let (lindex, rindex) = self.range_bounds(answer);

        // brackets must be present unless the range touches a tree edge
        if (self.ll.is_none() && lindex > 0) || (self.rl.is_none() && rindex + 1 < size as i64) {
            return false;
        }

        // brackets must enclose the query key
        if self
            .ll
            .as_deref()
            .is_some_and(|ll| key.as_bytes() < leaf_key(ll))
        {
            return false;
        }
        if self
            .rl
            .as_deref()
            .is_some_and(|rl| key.as_bytes() > leaf_key(rl))
        {
            return false;
        }

        let Some(leaves) = self.assemble_leaves(answer) else {
            return false;
        };

        // verifier-side tree: no leaves, no cache, just the parameters
        let tree = MerkleTree::new(
            self.twc.clone(),
            LEAF_TAG.to_vec(),
            INTERIOR_TAG.to_vec(),
            self.hash,
            Vec::new(),
        );
        let start = (lindex >= 0).then_some(lindex as usize);
        match tree.root_from_range(&leaves, start, size, self.lap.as_ref(), self.rap.as_ref()) {
            Ok(root) => root.as_slice() == snapshot,
            Err(_) => false,
        }
    }

    /// Inclusive leaf range `[lindex, rindex]` covered by the reconstructed
    /// sequence: the matches plus any brackets. `(-1, 0)` for the empty-tree
    /// shape, so the right-edge presence check pins `size` to at most one.
    fn range_bounds(&self, answer: &Answer) -> (i64, i64) {
        let Some(lindex) = self.index else {
            return (-1, 0);
        };
        let mut rindex = lindex as i64 + answer.len() as i64 - 1;
        if self.ll.is_some() {
            rindex += 1;
        }
        if self.rl.is_some() {
            rindex += 1;
        }
        (lindex as i64, rindex)
    }

    /// Rebuilds the consecutive leaf sequence `[ll?, matches..., rl?]`,
    /// rejecting answers whose subjects are not strictly ascending or do not
    /// sit between the brackets.
    fn assemble_leaves(&self, answer: &Answer) -> Option<Vec<Leaf>> {
        if answer.subjects.len() != answer.payloads.len() {
            return None;
        }
        if answer.subjects.iter().tuple_windows().any(|(a, b)| a >= b) {
            return None;
        }

        let mut leaves = Vec::with_capacity(answer.len() + 2);
        if let Some(ll) = &self.ll {
            if answer
                .subjects
                .first()
                .is_some_and(|first| leaf_key(ll) > first.as_bytes())
            {
                return None;
            }
            leaves.push(ll.clone());
        }
        for (subject, payload) in answer.subjects.iter().zip(&answer.payloads) {
            leaves.push(encode_leaf(self.hash, subject, payload));
        }
        if let Some(rl) = &self.rl {
            if answer
                .subjects
                .last()
                .is_some_and(|last| leaf_key(rl) < last.as_bytes())
            {
                return None;
            }
            leaves.push(rl.clone());
        }
        Some(leaves)
    }
}
