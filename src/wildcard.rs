//! The wildcard lookup layer.
//!
//! A [`WildcardTree`] seals a map of string keys to payload lists into a
//! Merkle tree whose leaf order is the byte-lexicographic key order. Every
//! set of keys sharing a prefix is then one contiguous leaf range, so a
//! query answer can be proven complete by bracketing that range with its
//! immediate neighbor leaves and their audit paths.
//!
//! Keys are compared exactly as stored. Callers that want DNS-style suffix
//! wildcards must store reversed names (`foo.com` → `moc.oof`) so that the
//! shared suffix becomes a shared prefix.

use crate::constant::{INTERIOR_TAG, LEAF_TAG};
use crate::index::PrefixIndex;
use crate::proof::Proof;
use crate::tree::MerkleTree;
use crate::types::{encode_leaf, leaf_key, Answer, AuditPath, Digest, HashFn, Leaf, Payload};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Per-key record in the lookup index: the stored payload and the position
/// of the key's leaf in the Merkle tree.
#[derive(Clone, Debug)]
struct IndexedPayload {
    payload: Payload,
    position: usize,
}

/// An authenticated key–value map answering wildcard-prefix queries.
///
/// Sealed at construction; all operations afterwards are read-only. The
/// first [`WildcardTree::snapshot`] call warms the internal digest cache,
/// after which the instance can be shared between threads.
#[derive(Clone, Debug)]
pub struct WildcardTree {
    index: PrefixIndex<IndexedPayload>,
    tree: MerkleTree,
}

/// A would-be-empty audit path (tree of one leaf) is recorded as absent.
fn path_opt(path: AuditPath) -> Option<AuditPath> {
    (!path.is_empty()).then_some(path)
}

impl WildcardTree {
    /// Seals `entries` into a wildcard tree under the tree-wide constant
    /// `twc` and hash function `hash`.
    ///
    /// Keys receive consecutive leaf positions in ascending byte order, and
    /// each leaf commits to its key and the digest of its payload list.
    pub fn new(twc: &[u8], hash: HashFn, entries: HashMap<String, Payload>) -> Self {
        let mut sorted: Vec<(String, Payload)> = entries.into_iter().collect();
        sorted.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

        let data: Vec<Leaf> = sorted
            .par_iter()
            .map(|(key, payload)| encode_leaf(hash, key, payload))
            .collect();

        let mut index = PrefixIndex::new();
        for (position, (key, payload)) in sorted.into_iter().enumerate() {
            index.insert(key, IndexedPayload { payload, position });
        }

        debug!(keys = index.len(), "sealed wildcard tree");
        Self {
            index,
            tree: MerkleTree::new(
                twc.to_vec(),
                LEAF_TAG.to_vec(),
                INTERIOR_TAG.to_vec(),
                hash,
                data,
            ),
        }
    }

    /// The root digest: the public commitment to the whole map.
    pub fn snapshot(&self) -> Digest {
        self.tree.root()
    }

    /// Number of stored keys. Verifiers need this alongside the snapshot.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the tree stores no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The underlying Merkle tree, for lower-level audit-path work.
    pub fn merkle_tree(&self) -> &MerkleTree {
        &self.tree
    }

    /// Answers a wildcard query: every stored key with `key` as a prefix,
    /// plus a proof that the answer is authentic and complete.
    pub fn get(&self, key: &str) -> (Answer, Proof) {
        let mut answer = Answer::default();
        let mut proof = Proof {
            hash: self.tree.hash_fn(),
            twc: self.tree.twc().to_vec(),
            index: None,
            ll: None,
            rl: None,
            lap: None,
            rap: None,
        };

        // empty tree: nothing to match, nothing to bracket
        if self.tree.is_empty() {
            return (answer, proof);
        }

        for (subject, record) in self.index.iter_prefix(key) {
            answer.subjects.push(subject.to_string());
            answer.payloads.push(record.payload.clone());
            if proof.index.is_none() {
                proof.index = Some(record.position);
            }
        }

        let data = self.tree.leaves();
        match proof.index {
            // no match: bracket the position where the key would sort
            None => {
                let p = data.partition_point(|leaf| leaf_key(leaf) < key.as_bytes());
                if p == data.len() {
                    // key sorts after every stored key
                    proof.index = Some(p - 1);
                    proof.ll = Some(data[p - 1].clone());
                    proof.lap = path_opt(self.tree.audit_path(p - 1));
                } else if p == 0 {
                    // key sorts before every stored key
                    proof.index = Some(0);
                    proof.rl = Some(data[0].clone());
                    proof.rap = path_opt(self.tree.audit_path(0));
                } else {
                    proof.index = Some(p - 1);
                    proof.ll = Some(data[p - 1].clone());
                    proof.rl = Some(data[p].clone());
                    proof.lap = path_opt(self.tree.audit_path(p - 1));
                    proof.rap = path_opt(self.tree.audit_path(p));
                }
            }
            // at least one match: bracket the contiguous match range
            Some(first) => {
                let after = first + answer.len();
                if after < data.len() {
                    proof.rl = Some(data[after].clone());
                    proof.rap = path_opt(self.tree.audit_path(after));
                }
                if first > 0 {
                    // the proof anchors at the left bracket from here on
                    proof.index = Some(first - 1);
                    proof.ll = Some(data[first - 1].clone());
                    proof.lap = path_opt(self.tree.audit_path(first - 1));
                }
            }
        }

        trace!(key, matches = answer.len(), "wildcard lookup");
        (answer, proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::DIGEST_WIDTH;
    use crate::hasher;

    fn entries(keys: &[&str]) -> HashMap<String, Payload> {
        keys.iter()
            .map(|k| (k.to_string(), vec![format!("{k} cert").into_bytes()]))
            .collect()
    }

    #[test]
    fn leaves_follow_ascending_key_order() {
        let tree = WildcardTree::new(&[0xff], hasher::sha256, entries(&["c", "a", "bb", "b"]));
        let keys: Vec<_> = tree
            .merkle_tree()
            .leaves()
            .iter()
            .map(|leaf| leaf_key(leaf).to_vec())
            .collect();
        assert_eq!(keys, [b"a".to_vec(), b"b".to_vec(), b"bb".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn leaf_encoding_commits_to_key_and_payload() {
        let tree = WildcardTree::new(&[0xff], hasher::sha256, entries(&["abc"]));
        let leaf = &tree.merkle_tree().leaves()[0];
        assert_eq!(leaf.len(), 3 + DIGEST_WIDTH);
        assert_eq!(&leaf[..3], b"abc");
        assert_eq!(&leaf[3..], hasher::sha256(&[b"abc cert"]).as_slice());
    }

    #[test]
    fn snapshot_is_independent_of_insertion_order() {
        let a = WildcardTree::new(&[0xff], hasher::sha256, entries(&["x", "y", "z"]));
        let b = WildcardTree::new(&[0xff], hasher::sha256, entries(&["z", "x", "y"]));
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn snapshot_of_empty_tree_is_the_empty_digest() {
        let tree = WildcardTree::new(&[0xff], hasher::sha256, HashMap::new());
        assert_eq!(tree.snapshot(), hasher::sha256(&[&[0xff]]));
        assert!(tree.is_empty());
    }

    #[test]
    fn distinct_constants_yield_distinct_snapshots() {
        let a = WildcardTree::new(&[0xff], hasher::sha256, entries(&["x"]));
        let b = WildcardTree::new(&[0xfe], hasher::sha256, entries(&["x"]));
        assert_ne!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn empty_prefix_matches_every_key() {
        let tree = WildcardTree::new(&[0xff], hasher::sha256, entries(&["a", "b", "c"]));
        let snapshot = tree.snapshot();
        let (answer, proof) = tree.get("");
        assert_eq!(answer.len(), 3);
        assert!(proof.verify("", &answer, tree.len(), &snapshot));
    }

    #[test]
    fn full_range_match_carries_no_brackets() {
        let tree = WildcardTree::new(&[0xff], hasher::sha256, entries(&["aa", "ab"]));
        let (answer, proof) = tree.get("a");
        assert_eq!(answer.len(), 2);
        assert!(proof.left_bracket().is_none());
        assert!(proof.right_bracket().is_none());
        assert!(proof.verify("a", &answer, tree.len(), &tree.snapshot()));
    }
}
