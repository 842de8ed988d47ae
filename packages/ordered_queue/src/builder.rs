use std::marker::PhantomData;

use crate::{ExtractionOrder, OrderedQueue};

/// Builder for creating an instance of [`OrderedQueue`].
///
/// You only need to use this builder if you want the stack (LIFO) discipline;
/// the default configuration used by [`OrderedQueue::new()`][1] extracts in
/// FIFO order within each priority.
///
/// # Examples
///
/// ```
/// use ordered_queue::{ExtractionOrder, OrderedQueue};
///
/// let queue = OrderedQueue::<u32>::builder()
///     .extraction_order(ExtractionOrder::Lifo)
///     .build();
/// ```
///
/// [1]: OrderedQueue::new
#[must_use]
pub struct OrderedQueueBuilder<T> {
    order: ExtractionOrder,

    _item: PhantomData<T>,
}

impl<T> std::fmt::Debug for OrderedQueueBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedQueueBuilder")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("order", &self.order)
            .finish()
    }
}

impl<T> OrderedQueueBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            order: ExtractionOrder::default(),
            _item: PhantomData,
        }
    }

    /// Sets the [extraction order][ExtractionOrder] for items of equal
    /// priority.
    pub fn extraction_order(mut self, order: ExtractionOrder) -> Self {
        self.order = order;
        self
    }

    /// Builds the queue with the specified configuration.
    #[must_use]
    pub fn build(self) -> OrderedQueue<T> {
        OrderedQueue::new_inner(self.order)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_order_is_fifo() {
        let queue = OrderedQueueBuilder::<u32>::new().build();

        assert_eq!(queue.extraction_order(), ExtractionOrder::Fifo);
    }

    #[test]
    fn debug_names_the_item_type() {
        let builder = OrderedQueue::<u32>::builder();

        assert!(format!("{builder:?}").contains("u32"));
    }
}
