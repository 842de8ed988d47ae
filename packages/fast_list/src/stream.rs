use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use futures::Stream;
use thiserror::Error;

use crate::FastList;

/// A cooperative cancellation signal observed by [`CancellableListStream`].
///
/// Cloning the token yields handles to the same signal; canceling any clone
/// cancels them all. Cancellation is one-way and permanent.
///
/// # Example
///
/// ```
/// use fast_list::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
///
/// assert!(!observer.is_canceled());
/// token.cancel();
/// assert!(observer.is_canceled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    is_canceled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new token in the non-canceled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.is_canceled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been signaled.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.is_canceled.load(Ordering::Relaxed)
    }
}

/// The error yielded by a [`CancellableListStream`] whose token was canceled
/// before the iteration reached the end of the list.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("list iteration was canceled before reaching the end of the list")]
pub struct IterationCanceled;

/// An asynchronous view over a [`FastList`], yielding `&T` in position order.
///
/// Every poll completes synchronously; the stream exists so that list
/// contents can feed stream-oriented consumers, not to introduce suspension.
///
/// Created by [`FastList::stream()`].
#[derive(Debug)]
pub struct ListStream<'a, T> {
    list: &'a FastList<T>,
    next_index: usize,
}

impl<'a, T> ListStream<'a, T> {
    pub(crate) fn new(list: &'a FastList<T>) -> Self {
        Self {
            list,
            next_index: 0,
        }
    }
}

impl<'a, T> Stream for ListStream<'a, T> {
    type Item = &'a T;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let item = self.list.get(self.next_index);

        if item.is_some() {
            self.next_index = self
                .next_index
                .checked_add(1)
                .expect("position is within the list, so this cannot overflow");
        }

        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len().saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

/// An asynchronous view over a [`FastList`] that honors a
/// [`CancellationToken`].
///
/// Yields `Ok(&T)` for each element. Once the token is canceled, the next
/// poll yields exactly one `Err(`[`IterationCanceled`]`)` and the stream then
/// terminates.
///
/// Created by [`FastList::stream_cancellable()`].
#[derive(Debug)]
pub struct CancellableListStream<'a, T> {
    list: &'a FastList<T>,
    cancel: CancellationToken,
    next_index: usize,
    terminated: bool,
}

impl<'a, T> CancellableListStream<'a, T> {
    pub(crate) fn new(list: &'a FastList<T>, cancel: CancellationToken) -> Self {
        Self {
            list,
            cancel,
            next_index: 0,
            terminated: false,
        }
    }
}

impl<'a, T> Stream for CancellableListStream<'a, T> {
    type Item = Result<&'a T, IterationCanceled>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.terminated {
            return Poll::Ready(None);
        }

        if self.cancel.is_canceled() {
            self.terminated = true;
            return Poll::Ready(Some(Err(IterationCanceled)));
        }

        match self.list.get(self.next_index) {
            Some(item) => {
                self.next_index = self
                    .next_index
                    .checked_add(1)
                    .expect("position is within the list, so this cannot overflow");

                Poll::Ready(Some(Ok(item)))
            }
            None => {
                self.terminated = true;
                Poll::Ready(None)
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use futures::StreamExt;
    use futures::executor::block_on;
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(CancellationToken: Send, Sync, Debug);
    assert_impl_all!(IterationCanceled: Send, Sync, Debug);

    #[test]
    fn stream_yields_all_elements_in_order() {
        let list = FastList::from([1, 2, 3]);

        let items: Vec<_> = block_on(list.stream().map(|item| *item).collect::<Vec<_>>());

        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn stream_of_empty_list_completes_immediately() {
        let list = FastList::<i32>::new();

        let items: Vec<&i32> = block_on(list.stream().collect::<Vec<_>>());

        assert!(items.is_empty());
    }

    #[test]
    fn stream_size_hint_shrinks_as_it_advances() {
        let list = FastList::from([1, 2]);
        let mut stream = list.stream();

        assert_eq!(stream.size_hint(), (2, Some(2)));

        _ = block_on(stream.next());
        assert_eq!(stream.size_hint(), (1, Some(1)));
    }

    #[test]
    fn cancellable_stream_without_cancellation_yields_everything() {
        let list = FastList::from([1, 2, 3]);

        let items: Vec<_> = block_on(
            list.stream_cancellable(CancellationToken::new())
                .collect::<Vec<_>>(),
        );

        assert_eq!(items, vec![Ok(&1), Ok(&2), Ok(&3)]);
    }

    #[test]
    fn canceled_before_start_yields_single_error() {
        let list = FastList::from([1, 2, 3]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let items: Vec<_> = block_on(list.stream_cancellable(cancel).collect::<Vec<_>>());

        assert_eq!(items, vec![Err(IterationCanceled)]);
    }

    #[test]
    fn canceled_mid_iteration_stops_with_error_then_terminates() {
        let list = FastList::from([1, 2, 3]);
        let cancel = CancellationToken::new();
        let mut stream = list.stream_cancellable(cancel.clone());

        assert_eq!(block_on(stream.next()), Some(Ok(&1)));

        cancel.cancel();

        assert_eq!(block_on(stream.next()), Some(Err(IterationCanceled)));
        assert_eq!(block_on(stream.next()), None);
        assert_eq!(block_on(stream.next()), None);
    }

    #[test]
    fn cancellation_is_shared_across_clones() {
        let token = CancellationToken::new();
        let observer = token.clone();

        token.cancel();

        assert!(observer.is_canceled());
    }
}
