use std::hash::Hash;

// We use foldhash for better performance with small hash tables.
use foldhash::{HashMap, HashMapExt};
use thiserror::Error;

/// Errors that can occur when inserting into a [`DoubleKeyMap`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DoubleKeyError {
    /// The primary key is already associated with a value.
    #[error("the primary key is already associated with a value")]
    DuplicatePrimary,

    /// The secondary key is already associated with a value.
    #[error("the secondary key is already associated with a value")]
    DuplicateSecondary,
}

/// A map whose every value is addressable under both a primary and a
/// secondary key.
///
/// Both key spaces are unique: inserting rejects a duplicate in either space
/// without any partial insertion. Removing by either key always detaches both
/// index entries, so the secondary index can never dangle.
///
/// # Example
///
/// ```
/// use keyed_collections::DoubleKeyMap;
///
/// let mut map = DoubleKeyMap::new();
///
/// map.insert(1_u32, "one", "first value").unwrap();
///
/// assert_eq!(map.get(&1), Some(&"first value"));
/// assert_eq!(map.get_by_second(&"one"), Some(&"first value"));
///
/// let (second_key, value) = map.remove(&1).unwrap();
/// assert_eq!(second_key, "one");
/// assert_eq!(value, "first value");
/// assert!(map.get_by_second(&"one").is_none());
/// ```
#[derive(Debug)]
pub struct DoubleKeyMap<K1, K2, V> {
    /// Ground truth: primary key to (secondary key, value).
    entries: HashMap<K1, (K2, V)>,

    /// Secondary index into `entries`. Every key here refers to an existing
    /// entry and every entry is referenced by exactly one key here.
    second_to_first: HashMap<K2, K1>,
}

impl<K1, K2, V> DoubleKeyMap<K1, K2, V>
where
    K1: Eq + Hash + Clone,
    K2: Eq + Hash + Clone,
{
    /// Creates a new empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            second_to_first: HashMap::new(),
        }
    }

    /// The number of values in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a value under a primary and a secondary key.
    ///
    /// Rejects the insertion when either key is already in use, leaving the
    /// map unmodified.
    pub fn insert(&mut self, first: K1, second: K2, value: V) -> Result<(), DoubleKeyError> {
        if self.entries.contains_key(&first) {
            return Err(DoubleKeyError::DuplicatePrimary);
        }

        if self.second_to_first.contains_key(&second) {
            return Err(DoubleKeyError::DuplicateSecondary);
        }

        _ = self
            .second_to_first
            .insert(second.clone(), first.clone());
        _ = self.entries.insert(first, (second, value));

        Ok(())
    }

    /// The value under a primary key.
    #[must_use]
    pub fn get(&self, first: &K1) -> Option<&V> {
        self.entries.get(first).map(|(_, value)| value)
    }

    /// An exclusive reference to the value under a primary key.
    #[must_use]
    pub fn get_mut(&mut self, first: &K1) -> Option<&mut V> {
        self.entries.get_mut(first).map(|(_, value)| value)
    }

    /// The value under a secondary key.
    #[must_use]
    pub fn get_by_second(&self, second: &K2) -> Option<&V> {
        let first = self.second_to_first.get(second)?;

        self.get(first)
    }

    /// The secondary key paired with a primary key.
    #[must_use]
    pub fn second_key(&self, first: &K1) -> Option<&K2> {
        self.entries.get(first).map(|(second, _)| second)
    }

    /// The primary key paired with a secondary key.
    #[must_use]
    pub fn first_key(&self, second: &K2) -> Option<&K1> {
        self.second_to_first.get(second)
    }

    /// Whether a value exists under this primary key.
    #[must_use]
    pub fn contains_key(&self, first: &K1) -> bool {
        self.entries.contains_key(first)
    }

    /// Whether a value exists under this secondary key.
    #[must_use]
    pub fn contains_second_key(&self, second: &K2) -> bool {
        self.second_to_first.contains_key(second)
    }

    /// Removes the value under a primary key, detaching both index entries.
    pub fn remove(&mut self, first: &K1) -> Option<(K2, V)> {
        let (second, value) = self.entries.remove(first)?;

        _ = self
            .second_to_first
            .remove(&second)
            .expect("every entry has exactly one secondary index entry");

        Some((second, value))
    }

    /// Removes the value under a secondary key, detaching both index entries.
    pub fn remove_by_second(&mut self, second: &K2) -> Option<(K1, V)> {
        let first = self.second_to_first.remove(second)?;

        let (_, value) = self
            .entries
            .remove(&first)
            .expect("every secondary index entry refers to an existing entry");

        Some((first, value))
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.second_to_first.clear();
    }

    /// An iterator over `(primary, secondary, value)` triples, in
    /// unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K1, &K2, &V)> {
        self.entries
            .iter()
            .map(|(first, (second, value))| (first, second, value))
    }
}

impl<K1, K2, V> Default for DoubleKeyMap<K1, K2, V>
where
    K1: Eq + Hash + Clone,
    K2: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(DoubleKeyMap<u32, String, f64>: Send, Sync, Debug);
    assert_impl_all!(DoubleKeyError: Send, Sync, Debug);

    #[test]
    fn smoke_test() {
        let mut map = DoubleKeyMap::new();

        map.insert(1, "one", 1.0).unwrap();
        map.insert(2, "two", 2.0).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(&1.0));
        assert_eq!(map.get_by_second(&"two"), Some(&2.0));
        assert_eq!(map.second_key(&1), Some(&"one"));
        assert_eq!(map.first_key(&"two"), Some(&2));
    }

    #[test]
    fn duplicate_primary_is_rejected_without_partial_insertion() {
        let mut map = DoubleKeyMap::new();
        map.insert(1, "one", 1.0).unwrap();

        let error = map.insert(1, "uno", 1.5).unwrap_err();

        assert!(matches!(error, DoubleKeyError::DuplicatePrimary));
        // The losing secondary key must not have been claimed.
        assert!(!map.contains_second_key(&"uno"));
    }

    #[test]
    fn duplicate_secondary_is_rejected_without_partial_insertion() {
        let mut map = DoubleKeyMap::new();
        map.insert(1, "one", 1.0).unwrap();

        let error = map.insert(2, "one", 2.0).unwrap_err();

        assert!(matches!(error, DoubleKeyError::DuplicateSecondary));
        assert!(!map.contains_key(&2));
    }

    #[test]
    fn remove_detaches_both_indexes() {
        let mut map = DoubleKeyMap::new();
        map.insert(1, "one", 1.0).unwrap();

        assert_eq!(map.remove(&1), Some(("one", 1.0)));

        assert!(map.is_empty());
        assert!(!map.contains_second_key(&"one"));

        // Both keys are free for reuse.
        map.insert(1, "one", 10.0).unwrap();
    }

    #[test]
    fn remove_by_second_detaches_both_indexes() {
        let mut map = DoubleKeyMap::new();
        map.insert(1, "one", 1.0).unwrap();

        assert_eq!(map.remove_by_second(&"one"), Some((1, 1.0)));

        assert!(!map.contains_key(&1));
        assert_eq!(map.remove_by_second(&"one"), None);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut map = DoubleKeyMap::new();
        map.insert(1, "one", 1.0).unwrap();

        *map.get_mut(&1).unwrap() = 42.0;

        assert_eq!(map.get_by_second(&"one"), Some(&42.0));
    }

    #[test]
    fn iter_yields_every_triple() {
        let mut map = DoubleKeyMap::new();
        map.insert(1, "one", 1.0).unwrap();
        map.insert(2, "two", 2.0).unwrap();

        let mut triples: Vec<_> = map.iter().map(|(f, s, v)| (*f, *s, *v)).collect();
        triples.sort_by_key(|(first, _, _)| *first);

        assert_eq!(triples, vec![(1, "one", 1.0), (2, "two", 2.0)]);
    }

    #[test]
    fn clear_empties_both_indexes() {
        let mut map = DoubleKeyMap::new();
        map.insert(1, "one", 1.0).unwrap();

        map.clear();

        assert!(map.is_empty());
        assert!(!map.contains_second_key(&"one"));
    }
}
