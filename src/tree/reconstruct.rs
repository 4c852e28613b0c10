//! Root reconstruction from audit paths.
//!
//! These operations run on the verifier side: a [`MerkleTree`] built over no
//! leaves carries the tree-wide constant, tags, and hash function, and
//! recomputes a claimed root purely from supplied leaves and paths. The same
//! methods work on a producer instance, which is how the round-trip tests
//! exercise them.

use crate::proof::ProofError;
use crate::tree::merkle::{split_point, MerkleTree};
use crate::types::{AuditPath, Digest, Leaf};

/// Drops the outermost (closest-to-root) element of a path.
fn shrink(path: &[Digest]) -> &[Digest] {
    &path[..path.len().saturating_sub(1)]
}

/// Splits a run of `len` consecutive leaves starting at subtree-relative
/// index `i` across the two halves of a node whose left half covers `k`
/// leaves. Returns how many of the leaves land in the left half and the
/// run's start index relative to each half.
fn split_run(k: usize, len: usize, i: i64) -> (usize, i64, i64) {
    let s = k as i64 - i;
    if s > 0 {
        ((len as i64).min(s) as usize, i, 0)
    } else {
        (0, 0, -s)
    }
}

impl MerkleTree {
    /// Rebuilds the root digest assuming `leaf` sits at `index` in a tree of
    /// `size` leaves, folding in the sibling digests of `path` from the leaf
    /// upward. Levels where a right-edge node has no sibling are skipped,
    /// which is where the left-complete shape differs from a perfect tree.
    ///
    /// There is no failure mode: inconsistent `(index, size, path)` inputs
    /// produce a digest that will not match any honest root, and the caller
    /// is expected to compare the result against a trusted snapshot.
    pub fn root_from_audit_path(
        &self,
        leaf: &[u8],
        index: usize,
        size: usize,
        path: &AuditPath,
    ) -> Digest {
        let mut digest = self.leaf_digest(leaf);
        let mut siblings = path.iter();
        let mut index = index;
        let mut last_index = size.saturating_sub(1);
        while last_index > 0 {
            if index % 2 == 1 {
                let sibling = siblings.next().map_or(&[][..], |d| d.as_slice());
                digest = self.interior_digest(sibling, &digest);
            } else if index < last_index {
                let sibling = siblings.next().map_or(&[][..], |d| d.as_slice());
                digest = self.interior_digest(&digest, sibling);
            }
            index /= 2;
            last_index /= 2;
        }
        digest
    }

    /// Rebuilds the root digest from a consecutive run of leaves.
    ///
    /// `data` is claimed to occupy positions `start .. start + data.len()`
    /// in a tree of `size` leaves; `start` is `None` only for an empty tree.
    /// `lap` and `rap` are audit paths to the run's leftmost and rightmost
    /// leaves, either of which may be absent when the run touches the
    /// corresponding edge of the tree.
    ///
    /// A single leaf strictly inside the tree is rejected: it cannot show
    /// that no sibling leaves exist next to it, so such a run proves
    /// nothing about completeness. The other rejections are shape checks
    /// that keep every later slice in bounds. Any input passing validation
    /// yields a digest; whether it matches the snapshot is the caller's
    /// comparison.
    pub fn root_from_range(
        &self,
        data: &[Leaf],
        start: Option<usize>,
        size: usize,
        lap: Option<&AuditPath>,
        rap: Option<&AuditPath>,
    ) -> Result<Digest, ProofError> {
        // special case: empty tree, every other parameter must be absent
        if size == 0 {
            if !data.is_empty() || start.is_some() || lap.is_some() || rap.is_some() {
                return Err(ProofError::EmptyTree);
            }
            return Ok(self.empty_digest());
        }

        // special case: the root is a leaf, exactly one entry and no paths
        if size == 1 {
            if data.len() != 1 || start != Some(0) || lap.is_some() || rap.is_some() {
                return Err(ProofError::RootIsLeaf);
            }
            return Ok(self.leaf_digest(&data[0]));
        }

        // Signed index arithmetic from here on: out-of-contract inputs must
        // degrade to a wrong digest, never to a panic.
        let i = start.map_or(-1, |s| s as i64);
        if i + data.len() as i64 > size as i64 {
            return Err(ProofError::TreeTooSmall);
        }
        if data.len() == 1 && i > 0 && i < size as i64 - 1 {
            return Err(ProofError::SingleMiddleLeaf);
        }

        let lap = lap.map_or(&[][..], |p| p.as_slice());
        let rap = rap.map_or(&[][..], |p| p.as_slice());
        Ok(self.joint_paths(data, i, size, lap, rap))
    }

    /// Descent while the two paths may still share ancestors. As long as the
    /// outermost elements of both paths are equal, the whole run lives in
    /// one half of the current node and the shared element is the other
    /// half's digest. Once the paths diverge (or one is absent), each side
    /// continues on its own in [`MerkleTree::disjoint_path`].
    fn joint_paths(&self, data: &[Leaf], i: i64, n: usize, lap: &[Digest], rap: &[Digest]) -> Digest {
        let k = split_point(n);
        let (sindex, lindex, rindex) = split_run(k, data.len(), i);

        if let (Some(l_outer), Some(r_outer)) = (lap.last(), rap.last()) {
            if l_outer == r_outer {
                return if sindex > 0 {
                    self.interior_digest(
                        &self.joint_paths(data, lindex, k, shrink(lap), shrink(rap)),
                        l_outer,
                    )
                } else {
                    self.interior_digest(
                        r_outer,
                        &self.joint_paths(data, rindex, n - k, shrink(lap), shrink(rap)),
                    )
                };
            }
        }

        // A run touching a tree edge carries a single path; aliasing it to
        // the absent side lets both halves read sibling digests the same way.
        let (lap, rap) = if lap.is_empty() {
            (rap, rap)
        } else if rap.is_empty() {
            (lap, lap)
        } else {
            (lap, rap)
        };

        self.interior_digest(
            &self.disjoint_path(&data[..sindex], lindex, k, lap),
            &self.disjoint_path(&data[sindex..], rindex, n - k, rap),
        )
    }

    /// Descent below the point where the paths diverged. A subtree holding
    /// none of the run is authenticated wholesale by the path's sibling
    /// digest at this level; a single leaf is recomputed from the run; and
    /// interior nodes split the run again, dropping one outward path element
    /// per level.
    fn disjoint_path(&self, data: &[Leaf], i: i64, n: usize, path: &[Digest]) -> Digest {
        if data.is_empty() {
            return path.last().cloned().unwrap_or_default();
        }
        if n == 1 {
            return self.leaf_digest(data.last().map_or(&[][..], |l| l.as_slice()));
        }
        let k = split_point(n);
        let (sindex, lindex, rindex) = split_run(k, data.len(), i);
        self.interior_digest(
            &self.disjoint_path(&data[..sindex], lindex, k, shrink(path)),
            &self.disjoint_path(&data[sindex..], rindex, n - k, shrink(path)),
        )
    }
}
