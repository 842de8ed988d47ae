use thiserror::Error;

/// The error returned when adding an entry under a key that is already
/// present in an [`ObservableDictionary`][crate::ObservableDictionary].
///
/// The rejected operation leaves the dictionary unmodified and emits no
/// change notification.
#[derive(Debug, Error)]
#[error("an item with the same key has already been added")]
pub struct DuplicateKeyError<K> {
    /// The key that was already present.
    pub key: K,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(DuplicateKeyError<String>: Send, Sync, Debug);

    #[test]
    fn carries_the_rejected_key() {
        let error = DuplicateKeyError { key: "k" };

        assert_eq!(error.key, "k");
        assert_eq!(
            error.to_string(),
            "an item with the same key has already been added"
        );
    }
}
