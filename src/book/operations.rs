//! Public order operations: submission and cancellation.

use super::book::LimitOrderBook;
use super::error::BookError;
use super::order::{Order, OrderId, Side};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

impl<T> LimitOrderBook<T>
where
    T: Clone,
{
    /// Submit an order: match it against the opposing side in price-time
    /// priority, then rest any remainder on the book.
    ///
    /// Market orders (`price: None`) are given a price that crosses the
    /// whole opposing side — bids the price of `max_level`, asks one tick —
    /// and the synthesized price is written back into the order so a
    /// resting remainder can later be cancelled by level.
    ///
    /// Returns the post-call trade nonce. The nonce increments only when a
    /// resting order outsizes the incoming one (the partial-fill exit);
    /// full-fill sweeps and pure insertions leave it unchanged, so it is
    /// not a per-fill sequence number — [`Fill::seq`](super::fill::Fill)
    /// counts every match.
    ///
    /// # Errors
    /// [`BookError::InvalidSize`] when `size` is not strictly positive and
    /// finite; [`BookError::InvalidPrice`] when a supplied limit price is
    /// not strictly positive and finite. Prices above `max_price` are not
    /// rejected: they rest beyond `max_level`, invisible to readers.
    pub fn process_order(&mut self, mut order: Order<T>) -> Result<u64, BookError> {
        if !(order.size > 0.0 && order.size.is_finite()) {
            return Err(BookError::InvalidSize { size: order.size });
        }
        let price = match order.price {
            Some(price) if price > 0.0 && price.is_finite() => price,
            Some(price) => return Err(BookError::InvalidPrice { price }),
            None => {
                let synthetic = match order.side {
                    Side::Bid => self.level_to_price(self.max_level),
                    Side::Ask => self.tick_size,
                };
                order.price = Some(synthetic);
                synthetic
            }
        };
        let level = self.price_to_level(price);
        trace!(
            "book {}: incoming {} size {} at level {}",
            self.symbol, order.side, order.size, level
        );
        let nonce = match order.side {
            Side::Bid => self.match_bid(order, level),
            Side::Ask => self.match_ask(order, level),
        };
        Ok(nonce)
    }

    /// Cancel the resting order with `id`.
    ///
    /// Unknown ids, repeated cancels, and ids already consumed by fills are
    /// silent no-ops returning `None`. On success the order is removed from
    /// its level queue and the id index, and returned with `size` zeroed.
    /// No fill is relayed.
    pub fn cancel_order(&mut self, id: OrderId) -> Option<Order<T>> {
        let entry = self.orders_by_id.remove(&id)?;
        let (price, side) = {
            let order = entry.borrow();
            (order.price, order.side)
        };
        entry.borrow_mut().size = 0.0;
        if let Some(price) = price {
            let level = self.price_to_level(price);
            if let Some(level_entry) = self.levels.get_mut(&level) {
                let queue = level_entry.queue_mut(side);
                // A fill may already have dequeued the order; nothing to
                // remove then.
                if let Some(position) = queue.iter().position(|resting| Rc::ptr_eq(resting, &entry))
                {
                    queue.remove(position);
                }
            }
        }
        trace!("book {}: cancelled {}", self.symbol, id);
        Some(
            Rc::try_unwrap(entry)
                .map(RefCell::into_inner)
                .unwrap_or_else(|still_shared| still_shared.borrow().clone()),
        )
    }
}
