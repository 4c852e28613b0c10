//! Constants that fix the wire shape of WMT digests.

/// Width in bytes of the digests produced by the reference hash adapter.
/// The key portion of a leaf is everything before a trailing digest of this
/// width, so producer and verifier must agree on it.
pub const DIGEST_WIDTH: usize = 32;

/// Domain-separation tag prepended to leaf hashes.
pub const LEAF_TAG: [u8; 1] = [0x00];

/// Domain-separation tag prepended to interior-node hashes.
pub const INTERIOR_TAG: [u8; 1] = [0x01];
