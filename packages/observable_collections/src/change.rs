/// An immutable description of one completed mutation of an observable
/// container.
///
/// A record carries only the data needed to describe the transition, never a
/// snapshot of the whole container. The list containers use the element type
/// as the payload; the dictionary containers use `(key, value)` pairs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ChangeRecord<T> {
    /// An item was added to the container.
    Added {
        /// The item that was added.
        new_item: T,
    },

    /// An item was removed from the container.
    Removed {
        /// The item that was removed.
        old_item: T,
    },

    /// An item was replaced by another item.
    Replaced {
        /// The item that took the old item's place.
        new_item: T,

        /// The item that was displaced.
        old_item: T,
    },

    /// The container was cleared of all items at once.
    Reset,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(ChangeRecord<u32>: Clone, Debug, Send, Sync);

    #[test]
    fn records_compare_by_payload() {
        assert_eq!(
            ChangeRecord::Added { new_item: 1 },
            ChangeRecord::Added { new_item: 1 }
        );

        assert_ne!(
            ChangeRecord::Added { new_item: 1 },
            ChangeRecord::Removed { old_item: 1 }
        );

        assert_eq!(ChangeRecord::<u32>::Reset, ChangeRecord::<u32>::Reset);
    }
}
