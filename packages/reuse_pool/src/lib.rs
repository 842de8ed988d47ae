#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! An object pool that hands out instances created by a caller-supplied
//! factory and reclaims them when the caller is done.
//!
//! Renting returns a [`Pooled<T>`] guard that dereferences to the instance;
//! dropping the guard parks the instance back in the pool for reuse. There
//! is no eviction and no size limit - the pool only ever holds instances
//! that were explicitly returned to it.
//!
//! # Example
//!
//! ```
//! use reuse_pool::ReusePool;
//!
//! let pool = ReusePool::new(|| Vec::<u8>::with_capacity(1024));
//!
//! {
//!     let mut buffer = pool.rent();
//!     buffer.extend_from_slice(b"hello");
//! } // Returned to the pool here.
//!
//! assert_eq!(pool.idle_len(), 1);
//!
//! // The same instance comes back, contents included; clear it if needed.
//! let buffer = pool.rent();
//! assert_eq!(&**buffer, b"hello");
//! ```

mod pool;

pub use pool::{Pooled, ReusePool};

// A poisoned lock means the process is in an unrecoverable/unsafe state and must exit (we panic).
pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - continued execution \
    is not safe because the set of idle pooled instances can no longer be trusted";
