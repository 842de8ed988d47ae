#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! An index-addressable, contiguous, growable sequence of elements with explicit
//! capacity management.
//!
//! [`FastList<T>`] is similar to [`Vec<T>`] but gives the caller direct control over
//! the capacity growth policy and exposes the positional search, sort and range
//! helpers of a classic array-list, plus both synchronous and asynchronous
//! iteration over its elements.
//!
//! # Capacity policy
//!
//! The backing buffer grows by amortized doubling: when an insertion would exceed
//! the current capacity, the new capacity is the largest of twice the current
//! capacity, the required capacity and [`FastList::DEFAULT_CAPACITY`]. Capacity
//! never shrinks unless [`FastList::trim_excess()`] is called explicitly.
//!
//! # Example
//!
//! ```
//! use fast_list::FastList;
//!
//! let mut list = FastList::new();
//!
//! list.push(5);
//! list.push(3);
//! list.push(1);
//! list.push(4);
//!
//! list.sort();
//! assert_eq!(list.as_slice(), &[1, 3, 4, 5]);
//! assert_eq!(list.binary_search(&4), Ok(2));
//! ```
//!
//! # Asynchronous iteration
//!
//! The list can also be consumed as a [`futures::Stream`]. The stream never
//! suspends - every element is already in memory, so each poll completes
//! synchronously - but it cooperates with a [`CancellationToken`]:
//!
//! ```
//! use fast_list::{CancellationToken, FastList};
//! use futures::StreamExt;
//! use futures::executor::block_on;
//!
//! let list: FastList<i32> = (0..4).collect();
//!
//! let cancel = CancellationToken::new();
//! let items: Vec<_> = block_on(list.stream_cancellable(cancel).collect());
//!
//! assert_eq!(items.len(), 4);
//! assert!(items.iter().all(Result::is_ok));
//! ```

mod list;
mod stream;

pub use list::FastList;
pub use stream::{CancellableListStream, CancellationToken, IterationCanceled, ListStream};
