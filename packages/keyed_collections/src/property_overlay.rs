// We use foldhash for better performance with small hash tables.
use foldhash::{HashMap, HashMapExt, HashSet, HashSetExt};
use thiserror::Error;

/// The error returned when assigning an overlay value under a name that is
/// registered as native in a [`PropertyOverlay`].
#[derive(Debug, Error)]
#[error("the name '{name}' is registered as a native property and cannot be shadowed")]
pub struct NativeNameError {
    /// The native name the assignment tried to shadow.
    pub name: String,
}

/// A typed map of named dynamic extension values, consulted only for names
/// the host type does not answer itself.
///
/// The host registers its statically-typed ("native") property names up
/// front; overlay assignments under those names are rejected, so a dynamic
/// value can never shadow a native property. Everything else is an ordinary
/// name-to-value map.
///
/// # Example
///
/// ```
/// use keyed_collections::PropertyOverlay;
///
/// let mut overlay = PropertyOverlay::new();
/// overlay.register_native("id");
///
/// // Dynamic extension values may use any non-native name.
/// overlay.set("color", "red").unwrap();
/// assert_eq!(overlay.get("color"), Some(&"red"));
///
/// // Native names cannot be shadowed.
/// assert!(overlay.set("id", "oops").is_err());
/// ```
#[derive(Debug)]
pub struct PropertyOverlay<V> {
    /// Names the host type answers itself; never present in `values`.
    native: HashSet<String>,

    values: HashMap<String, V>,
}

impl<V> PropertyOverlay<V> {
    /// Creates a new overlay with no native names and no values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            native: HashSet::new(),
            values: HashMap::new(),
        }
    }

    /// Registers a name as native, returning whether it was newly registered.
    ///
    /// Any overlay value previously stored under the name is discarded - the
    /// native property takes precedence from this point on.
    pub fn register_native(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();

        _ = self.values.remove(&name);
        self.native.insert(name)
    }

    /// Whether a name is registered as native.
    #[must_use]
    pub fn is_native(&self, name: &str) -> bool {
        self.native.contains(name)
    }

    /// Assigns an overlay value, returning the previous value under the name.
    ///
    /// Rejects names registered as native, leaving the overlay unmodified.
    pub fn set(&mut self, name: impl Into<String>, value: V) -> Result<Option<V>, NativeNameError> {
        let name = name.into();

        if self.native.contains(&name) {
            return Err(NativeNameError { name });
        }

        Ok(self.values.insert(name, value))
    }

    /// The overlay value under a name. Never answers for native names.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.values.get(name)
    }

    /// Removes the overlay value under a name.
    ///
    /// Native names have no overlay value to remove, so this returns `None`
    /// for them.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.values.remove(name)
    }

    /// The number of overlay values (native registrations not included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the overlay holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// An iterator over the overlay value names, in unspecified order.
    pub fn overlay_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<V> Default for PropertyOverlay<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(PropertyOverlay<String>: Send, Sync, Debug);
    assert_impl_all!(NativeNameError: Send, Sync, Debug);

    #[test]
    fn overlay_answers_only_non_native_names() {
        let mut overlay = PropertyOverlay::new();
        overlay.register_native("id");

        overlay.set("color", 1).unwrap();

        assert_eq!(overlay.get("color"), Some(&1));
        assert_eq!(overlay.get("id"), None);
        assert!(overlay.is_native("id"));
        assert!(!overlay.is_native("color"));
    }

    #[test]
    fn native_names_cannot_be_shadowed() {
        let mut overlay = PropertyOverlay::new();
        overlay.register_native("id");

        let error = overlay.set("id", 1).unwrap_err();

        assert_eq!(error.name, "id");
        assert!(overlay.is_empty());
    }

    #[test]
    fn registering_native_discards_existing_overlay_value() {
        let mut overlay = PropertyOverlay::new();
        overlay.set("id", 1).unwrap();

        assert!(overlay.register_native("id"));

        assert_eq!(overlay.get("id"), None);
        assert!(overlay.is_empty());
    }

    #[test]
    fn register_native_reports_novelty() {
        let mut overlay = PropertyOverlay::<u32>::new();

        assert!(overlay.register_native("id"));
        assert!(!overlay.register_native("id"));
    }

    #[test]
    fn set_returns_previous_value() {
        let mut overlay = PropertyOverlay::new();

        assert_eq!(overlay.set("color", 1).unwrap(), None);
        assert_eq!(overlay.set("color", 2).unwrap(), Some(1));
        assert_eq!(overlay.remove("color"), Some(2));
        assert_eq!(overlay.remove("color"), None);
    }

    #[test]
    fn overlay_names_lists_values_only() {
        let mut overlay = PropertyOverlay::new();
        overlay.register_native("id");
        overlay.set("color", 1).unwrap();

        let names: Vec<_> = overlay.overlay_names().collect();

        assert_eq!(names, vec!["color"]);
    }
}
