use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

use crate::ERR_POISONED_LOCK;

/// A pool of reusable instances of `T` created by a caller-supplied factory.
///
/// [`rent()`][Self::rent] pops an idle instance or creates a fresh one; the
/// returned [`Pooled`] guard parks the instance back in the pool when
/// dropped. Renting takes `&self`, so the pool can be shared freely
/// (including across threads when `T: Send`).
///
/// Instances are returned as-is - the pool performs no resetting. Callers
/// that need a clean instance must reset it themselves on rent or return.
pub struct ReusePool<T> {
    create: Box<dyn Fn() -> T + Send + Sync>,

    idle: Mutex<Vec<T>>,
}

impl<T> ReusePool<T> {
    /// Creates a new empty pool around an instance factory.
    ///
    /// # Example
    ///
    /// ```
    /// use reuse_pool::ReusePool;
    ///
    /// let pool = ReusePool::new(String::new);
    ///
    /// assert_eq!(pool.idle_len(), 0);
    /// ```
    #[must_use]
    pub fn new<F>(create: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            create: Box::new(create),
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Rents an instance, reusing an idle one when available and invoking the
    /// factory otherwise.
    ///
    /// The instance returns to the pool when the guard is dropped.
    #[must_use]
    pub fn rent(&self) -> Pooled<'_, T> {
        let instance = self
            .idle
            .lock()
            .expect(ERR_POISONED_LOCK)
            .pop()
            .unwrap_or_else(|| (self.create)());

        Pooled {
            pool: self,
            instance: Some(instance),
        }
    }

    /// Pre-creates `count` idle instances.
    pub fn prefill(&self, count: usize) {
        let mut idle = self.idle.lock().expect(ERR_POISONED_LOCK);

        idle.reserve(count);
        for _ in 0..count {
            idle.push((self.create)());
        }
    }

    /// The number of instances currently parked in the pool.
    ///
    /// Rented instances are not counted.
    #[must_use]
    pub fn idle_len(&self) -> usize {
        self.idle.lock().expect(ERR_POISONED_LOCK).len()
    }

    fn park(&self, instance: T) {
        self.idle.lock().expect(ERR_POISONED_LOCK).push(instance);
    }
}

impl<T> fmt::Debug for ReusePool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReusePool")
            .field("idle_len", &self.idle_len())
            .finish_non_exhaustive()
    }
}

/// A rented instance from a [`ReusePool`].
///
/// Dereferences to the instance. Dropping the guard parks the instance back
/// in the pool; [`take()`][Self::take] detaches it permanently instead.
#[derive(Debug)]
pub struct Pooled<'p, T> {
    pool: &'p ReusePool<T>,

    /// `None` only after `take()` or inside `drop()`.
    instance: Option<T>,
}

impl<T> Pooled<'_, T> {
    /// Detaches the instance from the pool permanently; it will not be
    /// returned when the guard is dropped.
    #[must_use]
    pub fn take(mut self) -> T {
        self.instance
            .take()
            .expect("the instance is present until take() or drop(), and take() consumes the guard")
    }
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.instance
            .as_ref()
            .expect("the instance is present until take() or drop(), and take() consumes the guard")
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.instance
            .as_mut()
            .expect("the instance is present until take() or drop(), and take() consumes the guard")
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(instance) = self.instance.take() {
            self.pool.park(instance);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(ReusePool<Vec<u8>>: Send, Sync, Debug);

    #[test]
    fn rent_creates_when_pool_is_empty() {
        let created = Arc::new(AtomicUsize::new(0));

        let pool = ReusePool::new({
            let created = Arc::clone(&created);
            move || created.fetch_add(1, Ordering::SeqCst)
        });

        let first = pool.rent();
        let second = pool.rent();

        assert_eq!(*first, 0);
        assert_eq!(*second, 1);
        assert_eq!(created.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropped_instance_is_reused() {
        let created = Arc::new(AtomicUsize::new(0));

        let pool = ReusePool::new({
            let created = Arc::clone(&created);
            move || created.fetch_add(1, Ordering::SeqCst)
        });

        drop(pool.rent());
        assert_eq!(pool.idle_len(), 1);

        let reused = pool.rent();
        assert_eq!(*reused, 0);
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn taken_instance_never_returns() {
        let pool = ReusePool::new(String::new);

        let instance = pool.rent().take();
        drop(instance);

        assert_eq!(pool.idle_len(), 0);
    }

    #[test]
    fn prefill_parks_instances() {
        let pool = ReusePool::new(String::new);

        pool.prefill(3);

        assert_eq!(pool.idle_len(), 3);
    }

    #[test]
    fn guard_allows_mutation_in_place() {
        let pool = ReusePool::new(Vec::<u8>::new);

        {
            let mut buffer = pool.rent();
            buffer.push(42);
        }

        let buffer = pool.rent();
        assert_eq!(&**buffer, &[42]);
    }

    #[test]
    fn shared_across_threads() {
        let pool = Arc::new(ReusePool::new(Vec::<u8>::new));

        let threads: Vec<_> = (0..4)
            .map(|_| {
                thread::spawn({
                    let pool = Arc::clone(&pool);
                    move || {
                        for _ in 0..100 {
                            let mut buffer = pool.rent();
                            buffer.push(1);
                        }
                    }
                })
            })
            .collect();

        for thread in threads {
            thread.join().unwrap();
        }

        // Never more instances parked than threads that were renting.
        assert!(pool.idle_len() <= 4);
        assert!(pool.idle_len() >= 1);
    }
}
