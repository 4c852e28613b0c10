//! Wildcard answer proofs: production lives in [`crate::WildcardTree::get`],
//! the proof object and its verification predicate live here.
use thiserror::Error;

pub mod verifier;

pub use verifier::Proof;

/// Rejection reasons for a structurally malformed range proof.
///
/// Only [`crate::MerkleTree::root_from_range`] returns these; everything the
/// verification predicate itself detects collapses into a plain `false`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ProofError {
    /// A proof for an empty tree carried leaves, an index, or paths.
    #[error("malformed proof: tree is empty")]
    EmptyTree,
    /// A proof for a single-leaf tree did not consist of exactly that leaf.
    #[error("malformed proof: the root is a leaf")]
    RootIsLeaf,
    /// The claimed range extends past the end of the tree.
    #[error("malformed proof: tree too small")]
    TreeTooSmall,
    /// A single leaf strictly inside the tree cannot prove completeness.
    #[error("malformed proof: expected range but got exact")]
    SingleMiddleLeaf,
}
