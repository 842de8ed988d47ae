#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! An explicit registry of lazily created one-per-type shared instances.
//!
//! [`InstanceRegistry`] maps type identity to a single shared instance of
//! that type, created on first lookup. It is an ordinary value - create one,
//! pass it by reference to the consumers that should share instances, and
//! drop it when they are done. There is deliberately no process-wide implicit
//! registry: sharing scope is exactly the scope of the registry value.
//!
//! # Example
//!
//! ```
//! use instance_registry::InstanceRegistry;
//!
//! struct Config {
//!     verbose: bool,
//! }
//!
//! let registry = InstanceRegistry::new();
//!
//! let first = registry.get_or_create(|| Config { verbose: true });
//! let second = registry.get_or_create(|| Config { verbose: false });
//!
//! // The second lookup returned the instance created by the first.
//! assert!(second.verbose);
//! assert_eq!(registry.len(), 1);
//! # _ = first;
//! ```

mod registry;

pub use registry::InstanceRegistry;

// A poisoned lock means the process is in an unrecoverable/unsafe state and must exit (we panic).
pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - continued execution \
    is not safe because the registry contents can no longer be trusted";
