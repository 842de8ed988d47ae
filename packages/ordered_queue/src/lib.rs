#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A priority-ordered container that can behave as a queue or as a stack.
//!
//! [`OrderedQueue<T>`] always extracts from the highest priority present;
//! within one priority, the extraction order is chosen at construction time
//! via [`ExtractionOrder`]: first-in-first-out (queue discipline, the
//! default) or last-in-first-out (stack discipline).
//!
//! # Example
//!
//! ```
//! use ordered_queue::OrderedQueue;
//!
//! let mut queue = OrderedQueue::new();
//!
//! queue.push("routine", 0);
//! queue.push("urgent", 10);
//! queue.push("also routine", 0);
//!
//! assert_eq!(queue.pop(), Some("urgent"));
//! assert_eq!(queue.pop(), Some("routine"));
//! assert_eq!(queue.pop(), Some("also routine"));
//! assert_eq!(queue.pop(), None);
//! ```

mod builder;
mod queue;

pub use builder::OrderedQueueBuilder;
pub use queue::{ExtractionOrder, OrderedQueue};
