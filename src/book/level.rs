//! Price levels: a pair of FIFO order queues per integer level.

use super::order::{Order, Side};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Shared handle to a resting order.
///
/// The level queue holds the primary reference; the id index holds a second
/// one so cancellation can find the order without scanning levels. Both
/// references are dropped together: a fill that dequeues the order also
/// removes it from the index, and vice versa for cancel.
pub(crate) type OrderRef<T> = Rc<RefCell<Order<T>>>;

/// One integer price level.
///
/// Levels materialize on first touch and stay allocated for the lifetime of
/// the book, so matching treats a missing key and an empty queue the same
/// way. Queues are strict FIFO: front is the oldest resting order.
#[derive(Debug)]
pub(crate) struct Level<T> {
    bids: VecDeque<OrderRef<T>>,
    asks: VecDeque<OrderRef<T>>,
}

impl<T> Default for Level<T> {
    fn default() -> Self {
        Self {
            bids: VecDeque::new(),
            asks: VecDeque::new(),
        }
    }
}

impl<T> Level<T> {
    /// The resting queue for `side`.
    pub(crate) fn queue(&self, side: Side) -> &VecDeque<OrderRef<T>> {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    pub(crate) fn queue_mut(&mut self, side: Side) -> &mut VecDeque<OrderRef<T>> {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Sum of resting sizes on `side`. Zero for an empty queue.
    pub(crate) fn total_size(&self, side: Side) -> f64 {
        self.queue(side).iter().map(|order| order.borrow().size).sum()
    }
}
