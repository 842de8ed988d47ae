#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Keyed utility collections.
//!
//! * [`DoubleKeyMap`] - every value is addressable under both a primary and a
//!   secondary key, with both key spaces kept unique.
//! * [`IndexNameMap`] - entries occupy stable insertion-order positions and
//!   carry a unique name, addressable by either.
//! * [`PropertyOverlay`] - a typed map of named dynamic extension values
//!   consulted only for names not claimed by the host type's own ("native")
//!   properties.
//!
//! All three are plain single-owner containers (`&mut self` mutators); wrap
//! them in a lock for cross-thread use.

mod double_key_map;
mod index_name_map;
mod property_overlay;

pub use double_key_map::{DoubleKeyError, DoubleKeyMap};
pub use index_name_map::{DuplicateNameError, IndexNameMap};
pub use property_overlay::{NativeNameError, PropertyOverlay};
