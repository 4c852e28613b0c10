//! This module implements the Merkle tree component: a static,
//! left-complete binary tree over the sealed leaf sequence, with root
//! computation, audit paths, and root reconstruction from single-leaf and
//! consecutive-range audit paths.

pub mod merkle;
pub mod reconstruct;

pub use merkle::MerkleTree;

#[cfg(test)]
pub(crate) mod test_utils;
