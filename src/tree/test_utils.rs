//! Shared fixtures for tree tests.

use crate::hasher;
use crate::tree::MerkleTree;
use crate::types::Leaf;

/// Leaves "1".."n" as decimal ASCII, the fixture behind the known-answer
/// root digests.
pub(crate) fn leaf_data(n: usize) -> Vec<Leaf> {
    (1..=n).map(|i| i.to_string().into_bytes()).collect()
}

/// Tree with an empty tree-wide constant and printable domain tags, matching
/// the setup the known-answer digests were computed with.
pub(crate) fn test_tree(data: Vec<Leaf>) -> MerkleTree {
    MerkleTree::new(
        Vec::new(),
        b"l".to_vec(),
        b"i".to_vec(),
        hasher::sha256,
        data,
    )
}
