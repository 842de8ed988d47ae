use std::mem;
use std::sync::{Mutex, MutexGuard};

use fast_list::FastList;

use crate::subscribers::Subscribers;
use crate::{ChangeRecord, ERR_POISONED_LOCK, SubscriptionId};

/// A list that serializes every read and write through a per-instance lock
/// and notifies subscribers of every successful mutation.
///
/// All operations take `&self`; the list is safe to share across threads
/// (`Arc<ObservableList<T>>`). Mutations on one instance are strictly
/// serialized by the lock, and the notification order observed by any
/// subscriber equals the order in which the mutating calls acquired it.
///
/// Elements are stored and emitted by value, so the element type must be
/// [`Clone`] for the mutating operations - a change record must remain valid
/// in subscriber hands after the lock is released.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use observable_collections::ObservableList;
///
/// let list = ObservableList::new();
///
/// let notifications = Arc::new(AtomicUsize::new(0));
/// let _subscription = list.subscribe({
///     let notifications = Arc::clone(&notifications);
///     move |_| {
///         notifications.fetch_add(1, Ordering::SeqCst);
///     }
/// });
///
/// list.add(1);
/// list.add(2);
/// assert!(list.remove(&1));
///
/// assert_eq!(list.to_vec(), vec![2]);
/// assert_eq!(notifications.load(Ordering::SeqCst), 3);
/// ```
#[derive(Debug)]
pub struct ObservableList<T> {
    inner: Mutex<ListInner<T>>,
}

#[derive(Debug)]
struct ListInner<T> {
    items: FastList<T>,

    /// The record of the most recently completed mutation. Never updated by
    /// read-only operations.
    last_change: Option<ChangeRecord<T>>,

    subscribers: Subscribers<T>,
}

impl<T> ListInner<T> {
    /// Completes a mutation: stores the record and notifies every subscriber,
    /// still inside the caller's critical section.
    fn commit(&mut self, record: ChangeRecord<T>) {
        self.last_change = Some(record);

        let record = self
            .last_change
            .as_ref()
            .expect("the record was stored on the line above");

        self.subscribers.notify(record);
    }
}

impl<T> ObservableList<T> {
    /// Creates a new empty observable list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ListInner {
                items: FastList::new(),
                last_change: None,
                subscribers: Subscribers::new(),
            }),
        }
    }

    /// Registers a callback invoked after every successful mutation, while
    /// the instance lock is still held.
    ///
    /// Because the callback runs inside the critical section, a slow callback
    /// blocks all other operations on this instance, and a callback that
    /// calls back into the same instance deadlocks - the lock is not
    /// reentrant. Subscribers must treat the callback as a brief, exclusive
    /// observation window.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeRecord<T>) + Send + 'static,
    {
        self.lock().subscribers.subscribe(Box::new(callback))
    }

    /// Removes a subscription, returning whether it existed.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        self.lock().subscribers.unsubscribe(subscription)
    }

    /// The number of elements in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Whether the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, ListInner<T>> {
        self.inner.lock().expect(ERR_POISONED_LOCK)
    }
}

impl<T> ObservableList<T>
where
    T: Clone,
{
    /// Appends an element at the end of the list.
    ///
    /// Records [`ChangeRecord::Added`] and notifies subscribers.
    pub fn add(&self, item: T) {
        let mut inner = self.lock();

        inner.items.push(item.clone());
        inner.commit(ChangeRecord::Added { new_item: item });
    }

    /// Inserts an element at `index`, shifting subsequent elements right.
    ///
    /// Records [`ChangeRecord::Added`] and notifies subscribers.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`; the list is left unmodified and nothing is
    /// notified.
    pub fn insert(&self, index: usize, item: T) {
        let mut inner = self.lock();

        let len = inner.items.len();
        if index > len {
            // Release the lock before panicking so a caller bug does not
            // poison the whole list.
            drop(inner);
            panic!("insert index {index} is out of bounds for observable list of length {len}");
        }

        inner.items.insert(index, item.clone());
        inner.commit(ChangeRecord::Added { new_item: item });
    }

    /// Replaces the element at `index`, like an indexer assignment.
    ///
    /// Records [`ChangeRecord::Replaced`] with both the new and the displaced
    /// element and notifies subscribers.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`; the list is left unmodified and nothing is
    /// notified.
    pub fn set(&self, index: usize, item: T) {
        let mut inner = self.lock();

        let len = inner.items.len();
        if index >= len {
            // Release the lock before panicking so a caller bug does not
            // poison the whole list.
            drop(inner);
            panic!("set index {index} is out of bounds for observable list of length {len}");
        }

        let slot = inner
            .items
            .get_mut(index)
            .expect("index was bounds-checked above under the same lock acquisition");

        let old_item = mem::replace(slot, item.clone());
        inner.commit(ChangeRecord::Replaced {
            new_item: item,
            old_item,
        });
    }

    /// Removes and returns the element at `index`, shifting subsequent
    /// elements left.
    ///
    /// Records [`ChangeRecord::Removed`] and notifies subscribers.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`; the list is left unmodified and nothing is
    /// notified.
    pub fn remove_at(&self, index: usize) -> T {
        let mut inner = self.lock();

        let len = inner.items.len();
        if index >= len {
            // Release the lock before panicking so a caller bug does not
            // poison the whole list.
            drop(inner);
            panic!("remove_at index {index} is out of bounds for observable list of length {len}");
        }

        let old_item = inner.items.remove_at(index);
        inner.commit(ChangeRecord::Removed {
            old_item: old_item.clone(),
        });

        old_item
    }

    /// Removes the first occurrence of `item`, returning whether an element
    /// was removed.
    ///
    /// Records [`ChangeRecord::Removed`] and notifies subscribers only when a
    /// removal actually happened.
    pub fn remove(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let mut inner = self.lock();

        match inner.items.index_of(item) {
            Some(index) => {
                let old_item = inner.items.remove_at(index);
                inner.commit(ChangeRecord::Removed { old_item });
                true
            }
            None => false,
        }
    }

    /// Removes the first occurrence of `old_item` and **appends** `new_item`
    /// at the end of the list - the position of the old element is not
    /// preserved.
    ///
    /// Records [`ChangeRecord::Replaced`] and notifies subscribers when
    /// `old_item` was found; otherwise the list is unchanged, nothing is
    /// notified and `false` is returned.
    pub fn replace(&self, old_item: &T, new_item: T) -> bool
    where
        T: PartialEq,
    {
        let mut inner = self.lock();

        match inner.items.index_of(old_item) {
            Some(index) => {
                let old_item = inner.items.remove_at(index);
                inner.items.push(new_item.clone());
                inner.commit(ChangeRecord::Replaced { new_item, old_item });
                true
            }
            None => false,
        }
    }

    /// Removes all elements.
    ///
    /// Records [`ChangeRecord::Reset`] and notifies subscribers
    /// unconditionally, even when the list was already empty.
    pub fn clear(&self) {
        let mut inner = self.lock();

        inner.items.clear();
        inner.commit(ChangeRecord::Reset);
    }

    /// A clone of the element at `index`, or `None` when out of bounds.
    ///
    /// Read-only: never notifies.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.lock().items.get(index).cloned()
    }

    /// Whether the list contains an element equal to `item`.
    ///
    /// Read-only: never notifies.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.lock().items.index_of(item).is_some()
    }

    /// The position of the first element equal to `item`.
    ///
    /// Read-only: never notifies.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.lock().items.index_of(item)
    }

    /// Copies the elements into a `Vec`, in list order.
    ///
    /// Read-only: never notifies.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.lock().items.to_vec()
    }

    /// Invokes `f` for every element in list order, inside one critical
    /// section - the list cannot change mid-enumeration.
    ///
    /// Read-only: never notifies. The same reentrancy caveat applies as for
    /// [`subscribe`][Self::subscribe].
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        for item in self.lock().items.iter() {
            f(item);
        }
    }

    /// The record of the most recently completed mutation, or `None` when the
    /// list has never been mutated.
    ///
    /// Read-only operations never update this.
    #[must_use]
    pub fn last_change(&self) -> Option<ChangeRecord<T>> {
        self.lock().last_change.clone()
    }
}

impl<T> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ObservableList<T> {
    /// Creates a pre-populated list. Seeding emits no change notifications -
    /// there cannot be any subscribers yet.
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            inner: Mutex::new(ListInner {
                items: iter.into_iter().collect(),
                last_change: None,
                subscribers: Subscribers::new(),
            }),
        }
    }
}
