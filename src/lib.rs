#![doc = include_str!("../README.md")]

pub mod constant;
pub mod hasher;
pub mod index;
pub use index::PrefixIndex;
pub mod proof;
pub use proof::{Proof, ProofError};
pub mod tree;
pub use tree::MerkleTree;
pub mod types;
pub use types::*;
pub mod wildcard;
pub use wildcard::WildcardTree;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    /// A simple end-to-end test demonstrating the complete WMT workflow.
    fn basic_integration_test() {
        // Reversed DNS names so suffix wildcards become prefix queries
        let mut entries: HashMap<String, Payload> = HashMap::new();
        entries.insert(
            "moc.oof".into(),
            vec![b"cert 1".to_vec(), b"cert 2".to_vec()],
        );
        entries.insert("moc.oof.bus".into(), vec![b"sub cert".to_vec()]);
        entries.insert("es.xuq".into(), vec![b"qux cert".to_vec()]);

        // Alice seals the map and publishes the snapshot and size
        let tree = WildcardTree::new(&[0xff], hasher::sha256, entries);
        let snapshot = tree.snapshot();
        let size = tree.len();

        // A hit returns the matching keys in order plus a verifying proof
        let (answer, proof) = tree.get("moc.oof");
        assert_eq!(answer.subjects(), ["moc.oof", "moc.oof.bus"]);
        assert_eq!(answer.payloads()[0], [b"cert 1".to_vec(), b"cert 2".to_vec()]);
        assert!(proof.verify("moc.oof", &answer, size, &snapshot));

        // A miss proves that nothing matches
        let (answer, proof) = tree.get("moc.rab");
        assert!(answer.is_empty());
        assert!(proof.verify("moc.rab", &answer, size, &snapshot));

        // Bob rejects the proof for any other query or snapshot
        assert!(!proof.verify("moc.oof", &answer, size, &snapshot));
        let other = WildcardTree::new(&[0x00], hasher::sha256, HashMap::new());
        assert!(!proof.verify("moc.rab", &answer, other.len(), &other.snapshot()));
    }
}
