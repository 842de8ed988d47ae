use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

// We use foldhash for better performance with small hash tables.
use foldhash::{HashMap, HashMapExt};

use crate::subscribers::Subscribers;
use crate::{ChangeRecord, DuplicateKeyError, ERR_POISONED_LOCK, SubscriptionId};

/// A key-value dictionary that serializes every read and write through a
/// per-instance lock and notifies subscribers of every successful mutation.
///
/// Change records carry `(key, value)` pairs as their payload. The same
/// locking and notification contract applies as for
/// [`ObservableList`][crate::ObservableList]: mutation, change record and
/// subscriber callbacks all happen within one critical section, and
/// callbacks must not re-enter the instance.
///
/// # Example
///
/// ```
/// use observable_collections::{ChangeRecord, ObservableDictionary};
///
/// let dictionary = ObservableDictionary::new();
///
/// dictionary.add("a", 1).unwrap();
/// dictionary.add("b", 2).unwrap();
///
/// // Adding under an existing key is rejected and changes nothing.
/// assert!(dictionary.add("a", 10).is_err());
/// assert_eq!(dictionary.get(&"a"), Some(1));
///
/// // Indexer-style assignment replaces instead.
/// dictionary.set("a", 10);
/// assert_eq!(
///     dictionary.last_change(),
///     Some(ChangeRecord::Replaced {
///         new_item: ("a", 10),
///         old_item: ("a", 1),
///     })
/// );
/// ```
#[derive(Debug)]
pub struct ObservableDictionary<K, V> {
    inner: Mutex<DictionaryInner<K, V>>,
}

#[derive(Debug)]
struct DictionaryInner<K, V> {
    entries: HashMap<K, V>,

    /// The record of the most recently completed mutation. Never updated by
    /// read-only operations.
    last_change: Option<ChangeRecord<(K, V)>>,

    subscribers: Subscribers<(K, V)>,
}

impl<K, V> DictionaryInner<K, V> {
    /// Completes a mutation: stores the record and notifies every subscriber,
    /// still inside the caller's critical section.
    fn commit(&mut self, record: ChangeRecord<(K, V)>) {
        self.last_change = Some(record);

        let record = self
            .last_change
            .as_ref()
            .expect("the record was stored on the line above");

        self.subscribers.notify(record);
    }
}

impl<K, V> ObservableDictionary<K, V> {
    /// Creates a new empty observable dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(DictionaryInner {
                entries: HashMap::new(),
                last_change: None,
                subscribers: Subscribers::new(),
            }),
        }
    }

    /// Registers a callback invoked after every successful mutation, while
    /// the instance lock is still held.
    ///
    /// The same reentrancy caveat applies as for
    /// [`ObservableList::subscribe`][crate::ObservableList::subscribe]: the
    /// callback must not call back into this instance.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeRecord<(K, V)>) + Send + 'static,
    {
        self.lock().subscribers.subscribe(Box::new(callback))
    }

    /// Removes a subscription, returning whether it existed.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        self.lock().subscribers.unsubscribe(subscription)
    }

    /// The number of entries in the dictionary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the dictionary holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, DictionaryInner<K, V>> {
        self.inner.lock().expect(ERR_POISONED_LOCK)
    }
}

impl<K, V> ObservableDictionary<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Adds an entry under a key that must not be present yet.
    ///
    /// Records [`ChangeRecord::Added`] and notifies subscribers on success.
    /// When the key is already present, the dictionary is left unmodified,
    /// nothing is notified and the rejected key is returned in the error.
    pub fn add(&self, key: K, value: V) -> Result<(), DuplicateKeyError<K>> {
        let mut inner = self.lock();

        if inner.entries.contains_key(&key) {
            return Err(DuplicateKeyError { key });
        }

        _ = inner.entries.insert(key.clone(), value.clone());
        inner.commit(ChangeRecord::Added {
            new_item: (key, value),
        });

        Ok(())
    }

    /// Assigns a value under a key, like an indexer assignment.
    ///
    /// When the key exists, records [`ChangeRecord::Replaced`] with the old
    /// and the new pair; when it does not, behaves as [`add`][Self::add] and
    /// records [`ChangeRecord::Added`]. Notifies subscribers either way.
    pub fn set(&self, key: K, value: V) {
        let mut inner = self.lock();

        match inner.entries.insert(key.clone(), value.clone()) {
            Some(old_value) => inner.commit(ChangeRecord::Replaced {
                new_item: (key.clone(), value),
                old_item: (key, old_value),
            }),
            None => inner.commit(ChangeRecord::Added {
                new_item: (key, value),
            }),
        }
    }

    /// Removes the entry under `key`, returning its value.
    ///
    /// Records [`ChangeRecord::Removed`] and notifies subscribers only when
    /// an entry was actually removed.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut inner = self.lock();

        match inner.entries.remove_entry(key) {
            Some((key, value)) => {
                inner.commit(ChangeRecord::Removed {
                    old_item: (key, value.clone()),
                });
                Some(value)
            }
            None => None,
        }
    }

    /// Removes the entry under `key` only when its stored value equals
    /// `value`, returning whether a removal happened.
    ///
    /// Records [`ChangeRecord::Removed`] and notifies subscribers on success.
    pub fn remove_pair(&self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        let mut inner = self.lock();

        if !inner.entries.get(key).is_some_and(|stored| stored == value) {
            return false;
        }

        let (key, value) = inner
            .entries
            .remove_entry(key)
            .expect("presence was verified under the same lock acquisition");

        inner.commit(ChangeRecord::Removed {
            old_item: (key, value),
        });

        true
    }

    /// Removes `old_key` if present, inserts `(new_key, new_value)` and
    /// records [`ChangeRecord::Replaced`] describing the transition, using
    /// the caller-supplied `old_value` as the displaced pair's value.
    ///
    /// Notifies subscribers unconditionally; returns whether `old_key` was
    /// present.
    pub fn replace(&self, old_key: K, old_value: V, new_key: K, new_value: V) -> bool {
        let mut inner = self.lock();

        let was_present = inner.entries.remove(&old_key).is_some();

        _ = inner.entries.insert(new_key.clone(), new_value.clone());
        inner.commit(ChangeRecord::Replaced {
            new_item: (new_key, new_value),
            old_item: (old_key, old_value),
        });

        was_present
    }

    /// Removes all entries.
    ///
    /// Records [`ChangeRecord::Reset`] and notifies subscribers
    /// unconditionally, even when the dictionary was already empty.
    pub fn clear(&self) {
        let mut inner = self.lock();

        inner.entries.clear();
        inner.commit(ChangeRecord::Reset);
    }

    /// A clone of the value under `key`, or `None` when the key is absent.
    ///
    /// Read-only: never notifies.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().entries.get(key).cloned()
    }

    /// Whether an entry exists under `key`.
    ///
    /// Read-only: never notifies.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Whether an entry exists under `key` with a value equal to `value`.
    ///
    /// Read-only: never notifies.
    #[must_use]
    pub fn contains_pair(&self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.lock().entries.get(key).is_some_and(|stored| stored == value)
    }

    /// Clones of all keys, in unspecified order.
    ///
    /// Read-only: never notifies.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.lock().entries.keys().cloned().collect()
    }

    /// Clones of all values, in unspecified order.
    ///
    /// Read-only: never notifies.
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.lock().entries.values().cloned().collect()
    }

    /// Copies the entries into a `Vec` of pairs, in unspecified order.
    ///
    /// Read-only: never notifies.
    #[must_use]
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.lock()
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Invokes `f` for every entry, inside one critical section - the
    /// dictionary cannot change mid-enumeration.
    ///
    /// Read-only: never notifies. The same reentrancy caveat applies as for
    /// [`subscribe`][Self::subscribe].
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in &self.lock().entries {
            f(key, value);
        }
    }

    /// The record of the most recently completed mutation, or `None` when
    /// the dictionary has never been mutated.
    ///
    /// Read-only operations never update this.
    #[must_use]
    pub fn last_change(&self) -> Option<ChangeRecord<(K, V)>> {
        self.lock().last_change.clone()
    }
}

impl<K, V> Default for ObservableDictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for ObservableDictionary<K, V>
where
    K: Eq + Hash,
{
    /// Creates a pre-populated dictionary. Seeding emits no change
    /// notifications - there cannot be any subscribers yet. Later pairs win
    /// over earlier pairs with the same key.
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            inner: Mutex::new(DictionaryInner {
                entries: iter.into_iter().collect(),
                last_change: None,
                subscribers: Subscribers::new(),
            }),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;
    use std::sync::{Arc, Mutex};

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(ObservableDictionary<String, u32>: Send, Sync, Debug);

    /// Collects every record a subscriber observes, for later inspection.
    fn recording_subscriber<K, V>(
        dictionary: &ObservableDictionary<K, V>,
    ) -> Arc<Mutex<Vec<ChangeRecord<(K, V)>>>>
    where
        K: Clone + Send + 'static,
        V: Clone + Send + 'static,
    {
        let records = Arc::new(Mutex::new(Vec::new()));

        _ = dictionary.subscribe({
            let records = Arc::clone(&records);
            move |record| {
                records.lock().unwrap().push(record.clone());
            }
        });

        records
    }

    #[test]
    fn duplicate_add_is_rejected_without_side_effects() {
        let dictionary = ObservableDictionary::new();

        dictionary.add("k", 1).unwrap();

        let records = recording_subscriber(&dictionary);
        let error = dictionary.add("k", 2).unwrap_err();

        assert_eq!(error.key, "k");
        assert_eq!(dictionary.get(&"k"), Some(1));
        assert!(records.lock().unwrap().is_empty());

        // Indexer-style assignment afterwards succeeds and replaces.
        dictionary.set("k", 2);
        assert_eq!(dictionary.get(&"k"), Some(2));
        assert_eq!(
            *records.lock().unwrap(),
            vec![ChangeRecord::Replaced {
                new_item: ("k", 2),
                old_item: ("k", 1),
            }]
        );
    }

    #[test]
    fn set_of_absent_key_behaves_as_add() {
        let dictionary = ObservableDictionary::new();
        let records = recording_subscriber(&dictionary);

        dictionary.set("k", 1);

        assert_eq!(
            *records.lock().unwrap(),
            vec![ChangeRecord::Added { new_item: ("k", 1) }]
        );
    }

    #[test]
    fn add_add_remove_scenario() {
        let dictionary = ObservableDictionary::new();
        let records = recording_subscriber(&dictionary);

        dictionary.add("a".to_string(), 1).unwrap();
        dictionary.add("b".to_string(), 2).unwrap();
        assert_eq!(dictionary.remove(&"a".to_string()), Some(1));

        assert_eq!(dictionary.to_vec(), vec![("b".to_string(), 2)]);
        assert_eq!(
            *records.lock().unwrap(),
            vec![
                ChangeRecord::Added {
                    new_item: ("a".to_string(), 1)
                },
                ChangeRecord::Added {
                    new_item: ("b".to_string(), 2)
                },
                ChangeRecord::Removed {
                    old_item: ("a".to_string(), 1)
                },
            ]
        );
    }

    #[test]
    fn remove_of_absent_key_is_silent() {
        let dictionary = ObservableDictionary::<&str, u32>::new();
        let records = recording_subscriber(&dictionary);

        assert_eq!(dictionary.remove(&"missing"), None);

        assert!(records.lock().unwrap().is_empty());
    }

    #[test]
    fn remove_pair_checks_the_value() {
        let dictionary = ObservableDictionary::new();
        dictionary.add("k", 1).unwrap();

        assert!(!dictionary.remove_pair(&"k", &2));
        assert_eq!(dictionary.len(), 1);

        assert!(dictionary.remove_pair(&"k", &1));
        assert!(dictionary.is_empty());
    }

    #[test]
    fn replace_moves_to_the_new_key() {
        let dictionary = ObservableDictionary::new();
        dictionary.add("old", 1).unwrap();

        assert!(dictionary.replace("old", 1, "new", 2));

        assert!(!dictionary.contains_key(&"old"));
        assert_eq!(dictionary.get(&"new"), Some(2));
        assert_eq!(
            dictionary.last_change(),
            Some(ChangeRecord::Replaced {
                new_item: ("new", 2),
                old_item: ("old", 1),
            })
        );
    }

    #[test]
    fn replace_reports_absent_old_key() {
        let dictionary = ObservableDictionary::new();

        assert!(!dictionary.replace("ghost", 0, "new", 1));
        assert_eq!(dictionary.get(&"new"), Some(1));
    }

    #[test]
    fn clear_notifies_unconditionally() {
        let dictionary = ObservableDictionary::<&str, u32>::new();
        let records = recording_subscriber(&dictionary);

        dictionary.clear();

        assert_eq!(*records.lock().unwrap(), vec![ChangeRecord::Reset]);
    }

    #[test]
    fn reads_do_not_disturb_last_change() {
        let dictionary: ObservableDictionary<&str, u32> =
            [("a", 1), ("b", 2)].into_iter().collect();

        assert_eq!(dictionary.last_change(), None);

        dictionary.set("c", 3);
        let change = dictionary.last_change();

        assert!(dictionary.contains_key(&"a"));
        assert!(dictionary.contains_pair(&"b", &2));
        assert_eq!(dictionary.get(&"a"), Some(1));
        assert_eq!(dictionary.keys().len(), 3);
        assert_eq!(dictionary.values().len(), 3);
        dictionary.for_each(|_, _| {});

        assert_eq!(dictionary.last_change(), change);
    }

    #[test]
    fn seeded_dictionary_has_no_change_history() {
        let dictionary: ObservableDictionary<&str, u32> =
            [("a", 1)].into_iter().collect();

        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.last_change(), None);
    }
}
