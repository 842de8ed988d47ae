#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Observable collections: list and dictionary wrappers that serialize every
//! read and write through a per-instance lock and notify subscribers of every
//! successful mutation.
//!
//! Both [`ObservableList<T>`] and [`ObservableDictionary<K, V>`] follow the
//! same contract:
//!
//! * Every mutation acquires the instance lock, applies the change, records a
//!   [`ChangeRecord`] describing it and invokes every subscriber - all within
//!   one critical section. A mutation is never observable without its
//!   notification having been raised.
//! * Read operations pass through the same lock but never emit a record and
//!   never update [`last_change`][ObservableList::last_change].
//! * The notification order observed by any subscriber equals the real-time
//!   order in which the mutating calls acquired the lock.
//!
//! Subscriber callbacks run while the lock is held, so a slow callback blocks
//! all other operations on the instance and a callback that re-enters the
//! same instance deadlocks. See [`ObservableList::subscribe`].
//!
//! # Example
//!
//! ```
//! use observable_collections::{ChangeRecord, ObservableList};
//!
//! let list = ObservableList::new();
//!
//! let subscription = list.subscribe(|record| {
//!     if let ChangeRecord::Added { new_item } = record {
//!         println!("added {new_item}");
//!     }
//! });
//!
//! list.add("x");
//!
//! assert_eq!(list.len(), 1);
//! assert_eq!(
//!     list.last_change(),
//!     Some(ChangeRecord::Added { new_item: "x" })
//! );
//!
//! assert!(list.unsubscribe(subscription));
//! ```

mod change;
mod dictionary;
mod error;
mod list;
mod subscribers;

pub use change::ChangeRecord;
pub use dictionary::ObservableDictionary;
pub use error::DuplicateKeyError;
pub use list::ObservableList;
pub use subscribers::SubscriptionId;

// A poisoned lock means a mutation may have been applied without its change
// notification, so the container's core guarantee is already broken (we panic).
pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - continued execution \
    is not safe because a mutation may have completed without notifying subscribers";
