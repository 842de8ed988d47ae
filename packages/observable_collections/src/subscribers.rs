use std::fmt;

use crate::ChangeRecord;

/// Identifies one subscription on an observable container, for use with the
/// container's `unsubscribe` method.
///
/// Identifiers are never reused within the lifetime of a container instance.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(u64);

/// The subscriber table of one observable container.
///
/// Lives inside the same lock as the container data, which is what makes
/// "mutate, record, notify" a single atomic step - no separate subscriber
/// lock or ordering protocol is needed.
pub(crate) struct Subscribers<T> {
    /// The identifier handed out by the next `subscribe` call.
    next_id: u64,

    entries: Vec<(SubscriptionId, Callback<T>)>,
}

type Callback<T> = Box<dyn Fn(&ChangeRecord<T>) + Send>;

impl<T> Subscribers<T> {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, callback: Callback<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);

        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("one container cannot hand out u64::MAX subscriptions in its lifetime");

        self.entries.push((id, callback));
        id
    }

    /// Returns whether a subscription with this identifier existed.
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.entries.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(index) => {
                _ = self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invokes every subscriber with the record, in subscription order.
    pub(crate) fn notify(&self, record: &ChangeRecord<T>) {
        for (_, callback) in &self.entries {
            callback(record);
        }
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}
