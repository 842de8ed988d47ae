use std::any::{Any, TypeId};
use std::collections::hash_map;
use std::fmt;
use std::sync::{Arc, RwLock};

use hash_hasher::HashedMap;

use crate::ERR_POISONED_LOCK;

/// A registry of lazily created one-per-type shared instances.
///
/// Each registry owns at most one instance per type, created by the factory
/// passed to the first [`get_or_create()`][Self::get_or_create] call for that
/// type. Instances live until the registry is dropped; there is no removal.
///
/// The registry is `Send + Sync`; share it by reference (or inside an `Arc`)
/// among the consumers that should observe the same instances.
pub struct InstanceRegistry {
    /// `TypeId` is already a high-quality hash, so the map uses the identity
    /// hasher rather than re-hashing it.
    instances: RwLock<HashedMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl InstanceRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashedMap::default()),
        }
    }

    /// The shared instance of `T`, creating it via `create` when this is the
    /// first lookup of `T` in this registry.
    ///
    /// Under contention, `create` may be invoked concurrently by multiple
    /// first lookups - optimistic concurrency is used to throw away the extra
    /// instances if this proves necessary. The factory must therefore be
    /// idempotent and its results functionally equivalent; only one result is
    /// ever published to callers.
    ///
    /// # Example
    ///
    /// ```
    /// use instance_registry::InstanceRegistry;
    ///
    /// let registry = InstanceRegistry::new();
    ///
    /// let value = registry.get_or_create(|| 42_u32);
    /// assert_eq!(*value, 42);
    ///
    /// // Subsequent lookups never invoke the factory again.
    /// let value = registry.get_or_create::<u32, _>(|| unreachable!());
    /// assert_eq!(*value, 42);
    /// ```
    pub fn get_or_create<T, F>(&self, create: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        if let Some(instance) = self.try_get::<T>() {
            return instance;
        }

        // Create outside any lock - the factory may be arbitrarily slow and
        // must not block readers of unrelated types. The cost is that a
        // concurrent first lookup may also create; the entry check below
        // decides which instance is published.
        let candidate = Arc::new(create());

        let mut instances = self.instances.write().expect(ERR_POISONED_LOCK);

        match instances.entry(TypeId::of::<T>()) {
            hash_map::Entry::Occupied(entry) => Self::downcast::<T>(entry.get()),
            hash_map::Entry::Vacant(entry) => {
                _ = entry.insert(Arc::clone(&candidate) as Arc<dyn Any + Send + Sync>);
                candidate
            }
        }
    }

    /// The shared instance of `T`, or `None` when no lookup of `T` has
    /// created one yet.
    #[must_use]
    pub fn try_get<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.instances
            .read()
            .expect(ERR_POISONED_LOCK)
            .get(&TypeId::of::<T>())
            .map(|instance| Self::downcast::<T>(instance))
    }

    /// The number of types with a published instance.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.read().expect(ERR_POISONED_LOCK).len()
    }

    /// Whether no instance has been published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.read().expect(ERR_POISONED_LOCK).is_empty()
    }

    fn downcast<T>(instance: &Arc<dyn Any + Send + Sync>) -> Arc<T>
    where
        T: Any + Send + Sync,
    {
        Arc::clone(instance)
            .downcast::<T>()
            .expect("the map is keyed by TypeId, so the stored instance is of the keyed type")
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InstanceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
