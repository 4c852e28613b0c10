//! Static Merkle tree over a sealed leaf sequence.
//!
//! The tree is *left-complete*: every interior node over `n` leaves puts the
//! largest power of two strictly below `n` into its left subtree, so the
//! left subtree is perfect whenever possible and the right subtree repeats
//! the rule. Leaf and interior hashes are domain-separated by tag bytes, and
//! a tree-wide constant is mixed into leaf and empty-tree hashes to separate
//! independent deployments.
//!
//! Node digests are cached lazily in a mirror of the tree shape. A producer
//! that calls [`MerkleTree::root`] once has a fully warmed cache and can be
//! shared read-only afterwards; a verifier-side tree built over no leaves
//! caches nothing of interest.

use crate::types::{AuditPath, Digest, HashFn, Leaf};
use once_cell::sync::OnceCell;

/// Largest power of two strictly less than `n`. The left-subtree width of
/// any interior node covering `n >= 2` leaves.
pub(crate) fn split_point(n: usize) -> usize {
    debug_assert!(n >= 2);
    1 << (usize::BITS - 1 - (n - 1).leading_zeros())
}

/// One node of the lazily built digest cache. Mirrors the tree shape; a
/// filled cell never goes stale because the leaf sequence is frozen.
#[derive(Clone, Debug, Default)]
struct CacheNode {
    digest: OnceCell<Digest>,
    children: OnceCell<Box<(CacheNode, CacheNode)>>,
}

/// A static Merkle tree with single-leaf and consecutive-range audit paths.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    twc: Vec<u8>,
    leaf_tag: Vec<u8>,
    interior_tag: Vec<u8>,
    hash: HashFn,
    data: Vec<Leaf>,
    cache: CacheNode,
}

impl MerkleTree {
    /// Seals `data` into a tree using the given tree-wide constant, domain
    /// tags, and hash function. Nothing is hashed until first demand.
    pub fn new(
        twc: Vec<u8>,
        leaf_tag: Vec<u8>,
        interior_tag: Vec<u8>,
        hash: HashFn,
        data: Vec<Leaf>,
    ) -> Self {
        Self {
            twc,
            leaf_tag,
            interior_tag,
            hash,
            data,
            cache: CacheNode::default(),
        }
    }

    /// The sealed leaf sequence.
    pub fn leaves(&self) -> &[Leaf] {
        &self.data
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tree holds no leaves.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The injected hash function.
    pub fn hash_fn(&self) -> HashFn {
        self.hash
    }

    /// The tree-wide constant.
    pub fn twc(&self) -> &[u8] {
        &self.twc
    }

    /// Root digest of the tree. The first call populates the digest cache
    /// along the way; subsequent calls are cheap lookups.
    pub fn root(&self) -> Digest {
        self.node_digest(&self.data, &self.cache)
    }

    /// Audit path for the leaf at position `m`: the sibling digests met on
    /// the root-to-leaf descent, ordered from the leaf's own sibling out to
    /// the root's. Empty for trees of size zero or one. The caller must keep
    /// `m` below the tree size; larger values yield a meaningless path.
    pub fn audit_path(&self, m: usize) -> AuditPath {
        let mut siblings = Vec::new();
        self.sibling_digests(m, &self.data, &self.cache, &mut siblings);
        AuditPath(siblings)
    }

    fn node_digest(&self, data: &[Leaf], node: &CacheNode) -> Digest {
        node.digest
            .get_or_init(|| match data.len() {
                0 => self.empty_digest(),
                1 => self.leaf_digest(&data[0]),
                n => {
                    let k = split_point(n);
                    let children = node.children.get_or_init(Default::default);
                    self.interior_digest(
                        &self.node_digest(&data[..k], &children.0),
                        &self.node_digest(&data[k..], &children.1),
                    )
                }
            })
            .clone()
    }

    fn sibling_digests(&self, m: usize, data: &[Leaf], node: &CacheNode, out: &mut Vec<Digest>) {
        if data.len() <= 1 {
            return;
        }
        let k = split_point(data.len());
        let children = node.children.get_or_init(Default::default);
        if m < k {
            self.sibling_digests(m, &data[..k], &children.0, out);
            out.push(self.node_digest(&data[k..], &children.1));
        } else {
            self.sibling_digests(m - k, &data[k..], &children.1, out);
            out.push(self.node_digest(&data[..k], &children.0));
        }
    }

    /// `H(twc)`, the digest of an empty tree.
    pub(crate) fn empty_digest(&self) -> Digest {
        (self.hash)(&[self.twc.as_slice()])
    }

    /// `H(twc, leaf_tag, leaf)`.
    pub(crate) fn leaf_digest(&self, leaf: &[u8]) -> Digest {
        (self.hash)(&[self.twc.as_slice(), self.leaf_tag.as_slice(), leaf])
    }

    /// `H(interior_tag, left, right)`.
    pub(crate) fn interior_digest(&self, left: &[u8], right: &[u8]) -> Digest {
        (self.hash)(&[self.interior_tag.as_slice(), left, right])
    }
}
