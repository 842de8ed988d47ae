// We use foldhash for better performance with small hash tables.
use foldhash::{HashMap, HashMapExt};
use thiserror::Error;

/// The error returned when pushing an entry under a name that is already in
/// use in an [`IndexNameMap`].
#[derive(Debug, Error)]
#[error("the name '{name}' is already associated with an entry")]
pub struct DuplicateNameError {
    /// The name that was already in use.
    pub name: String,
}

/// A collection whose entries are addressable both by their insertion-order
/// position and by a unique name.
///
/// Positions are stable until an entry is removed; removal shifts later
/// entries down by one position, like a vector.
///
/// # Example
///
/// ```
/// use keyed_collections::IndexNameMap;
///
/// let mut map = IndexNameMap::new();
///
/// let position = map.push("width", 800).unwrap();
/// map.push("height", 600).unwrap();
///
/// assert_eq!(position, 0);
/// assert_eq!(map.get(0), Some(&800));
/// assert_eq!(map.get_by_name("height"), Some(&600));
/// assert_eq!(map.index_of("height"), Some(1));
/// ```
#[derive(Debug)]
pub struct IndexNameMap<V> {
    /// Ground truth, in position order.
    entries: Vec<Entry<V>>,

    /// Name to position. Rebuilt for the shifted tail on every removal.
    by_name: HashMap<String, usize>,
}

#[derive(Debug)]
struct Entry<V> {
    name: String,
    value: V,
}

impl<V> IndexNameMap<V> {
    /// Creates a new empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry, returning the position it was assigned.
    ///
    /// Rejects a name that is already in use, leaving the map unmodified.
    pub fn push(&mut self, name: impl Into<String>, value: V) -> Result<usize, DuplicateNameError> {
        let name = name.into();

        if self.by_name.contains_key(&name) {
            return Err(DuplicateNameError { name });
        }

        let position = self.entries.len();
        _ = self.by_name.insert(name.clone(), position);
        self.entries.push(Entry { name, value });

        Ok(position)
    }

    /// The value at a position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.entries.get(index).map(|entry| &entry.value)
    }

    /// An exclusive reference to the value at a position.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.entries.get_mut(index).map(|entry| &mut entry.value)
    }

    /// The value under a name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&V> {
        let position = *self.by_name.get(name)?;

        self.get(position)
    }

    /// An exclusive reference to the value under a name.
    #[must_use]
    pub fn get_mut_by_name(&mut self, name: &str) -> Option<&mut V> {
        let position = *self.by_name.get(name)?;

        self.get_mut(position)
    }

    /// The name of the entry at a position.
    #[must_use]
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|entry| entry.name.as_str())
    }

    /// The position of the entry under a name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Removes the entry at a position, shifting later entries down by one
    /// and re-indexing them.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> (String, V) {
        assert!(
            index < self.entries.len(),
            "remove_at index {index} is out of bounds for map of length {}",
            self.entries.len()
        );

        let entry = self.entries.remove(index);
        _ = self
            .by_name
            .remove(&entry.name)
            .expect("every entry has exactly one name index entry");

        // Later entries shifted down by one; their index entries follow.
        for (position, shifted) in self.entries.iter().enumerate().skip(index) {
            _ = self.by_name.insert(shifted.name.clone(), position);
        }

        (entry.name, entry.value)
    }

    /// Removes the entry under a name, shifting later entries down by one
    /// and re-indexing them.
    pub fn remove_by_name(&mut self, name: &str) -> Option<V> {
        let position = self.index_of(name)?;

        let (_, value) = self.remove_at(position);
        Some(value)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_name.clear();
    }

    /// An iterator over `(name, value)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), &entry.value))
    }
}

impl<V> Default for IndexNameMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
