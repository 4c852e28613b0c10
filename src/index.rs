//! Ordered-prefix index backing the wildcard layer.
//!
//! This module provides [`PrefixIndex`], an in-memory map that iterates its
//! keys in strict ascending byte-lexicographic order and can restrict that
//! iteration to keys sharing a given prefix. It is consulted only while
//! building a [`crate::WildcardTree`] and while answering queries; both are
//! read-only walks, so the index never changes after construction.
//!
//! `PrefixIndex` is not itself authenticated. It merely fixes the key order
//! that the Merkle tree commits to; any structure with byte-lexicographic
//! iteration and prefix scans would serve.

use std::collections::BTreeMap;
use std::ops::Bound;

/// A sorted map with ascending and prefix-restricted iteration.
#[derive(Clone, Debug, Default)]
pub struct PrefixIndex<V> {
    entries: BTreeMap<String, V>,
}

impl<V> PrefixIndex<V> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts a key-value pair, returning the previous value if any.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Looks up a single key.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries whose key starts with `prefix`, in ascending key order.
    ///
    /// Because the map is sorted on raw bytes, all such keys form one
    /// contiguous run starting at the first key `>= prefix`.
    pub fn iter_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a V)> {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(prefix))
            .map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> FromIterator<(String, V)> for PrefixIndex<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn sample() -> PrefixIndex<u32> {
        [
            ("moc.oof", 0),
            ("moc.oof.1bus", 1),
            ("moc.oof.2bus", 2),
            ("ude.rab.bus", 3),
            ("vog.zab", 4),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn iteration_is_strictly_ascending() {
        let index = sample();
        assert!(index
            .iter()
            .tuple_windows()
            .all(|((a, _), (b, _))| a < b));
    }

    #[test]
    fn prefix_iteration_returns_the_contiguous_run() {
        let index = sample();
        let matches: Vec<_> = index.iter_prefix("moc.oof").map(|(k, _)| k).collect();
        assert_eq!(matches, ["moc.oof", "moc.oof.1bus", "moc.oof.2bus"]);
    }

    #[test]
    fn prefix_iteration_of_absent_prefix_is_empty() {
        let index = sample();
        assert_eq!(index.iter_prefix("ten").count(), 0);
        assert_eq!(index.iter_prefix("moc.oof.3").count(), 0);
    }

    #[test]
    fn empty_prefix_matches_everything() {
        let index = sample();
        assert_eq!(index.iter_prefix("").count(), index.len());
    }
}
