//! The crossing sweeps at the heart of the matching engine.
//!
//! An incoming order consumes resting liquidity in price-time priority:
//! bids sweep the ask side from `ask_min` upward, asks sweep the bid side
//! from `bid_max` downward, strict FIFO within a level. The sweeps advance
//! the cursors lazily, one level per step, treating levels that were never
//! materialized and levels whose queue is empty identically.

use super::book::LimitOrderBook;
use super::fill::Fill;
use super::level::OrderRef;
use super::order::{Order, Side};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

impl<T> LimitOrderBook<T>
where
    T: Clone,
{
    /// Sweep resting asks against an incoming bid, then rest the remainder.
    ///
    /// The sweep condition is strict (`level > ask_min`): a bid priced
    /// exactly at the candidate best ask rests instead of trading, while
    /// the mirrored sell sweep is inclusive. Callers relying on crossing at
    /// the touch must price one tick through.
    pub(super) fn match_bid(&mut self, mut order: Order<T>, level: u64) -> u64 {
        while order.size > 0.0 && level > self.ask_min.get() {
            let cursor = self.ask_min.get();
            let Some(head) = self.front_ref(cursor, Side::Ask) else {
                self.ask_min.set(cursor + 1);
                continue;
            };
            if self.fill_head(&head, &mut order, cursor) {
                self.trade_nonce += 1;
                return self.trade_nonce;
            }
        }
        self.insert(order, level);
        self.trade_nonce
    }

    /// Sweep resting bids against an incoming ask, then rest the remainder.
    ///
    /// Inclusive sweep (`level <= bid_max`): a sell priced exactly at the
    /// candidate best bid matches.
    pub(super) fn match_ask(&mut self, mut order: Order<T>, level: u64) -> u64 {
        while order.size > 0.0 && level <= self.bid_max.get() {
            let cursor = self.bid_max.get();
            let Some(head) = self.front_ref(cursor, Side::Bid) else {
                if cursor == 0 {
                    // Bid side swept bare.
                    break;
                }
                self.bid_max.set(cursor - 1);
                continue;
            };
            if self.fill_head(&head, &mut order, cursor) {
                self.trade_nonce += 1;
                return self.trade_nonce;
            }
        }
        self.insert(order, level);
        self.trade_nonce
    }

    /// Match the incoming order against the resting queue head at `level`.
    ///
    /// Returns `true` when the resting order outsized the incoming one (the
    /// partial-fill exit); the caller bumps the trade nonce and stops.
    fn fill_head(&mut self, head: &OrderRef<T>, order: &mut Order<T>, level: u64) -> bool {
        let resting_side = order.side.opposite();
        let head_size = head.borrow().size;
        if head_size <= order.size {
            // Resting order fully consumed: dequeue it and drop its id
            // back-reference in the same step.
            order.size -= head_size;
            head.borrow_mut().size = 0.0;
            if let Some(entry) = self.levels.get_mut(&level) {
                entry.queue_mut(resting_side).pop_front();
            }
            if let Some(id) = head.borrow().id {
                self.orders_by_id.remove(&id);
            }
            self.relay_pair(head_size, head, order);
            false
        } else {
            // Incoming order fully consumed; the resting order shrinks and
            // keeps its queue position.
            let quantity = order.size;
            order.size = 0.0;
            head.borrow_mut().size -= quantity;
            self.relay_pair(quantity, head, order);
            true
        }
    }

    /// Rest the (possibly zero-size) remainder at `level` and widen the
    /// matching cursor toward it.
    fn insert(&mut self, order: Order<T>, level: u64) {
        let side = order.side;
        trace!(
            "book {}: {} size {} rests at level {}",
            self.symbol, side, order.size, level
        );
        let entry = Rc::new(RefCell::new(order));
        if let Some(id) = entry.borrow().id {
            self.orders_by_id.insert(id, Rc::clone(&entry));
        }
        self.levels
            .entry(level)
            .or_default()
            .queue_mut(side)
            .push_back(entry);
        match side {
            Side::Bid if self.bid_max.get() < level => self.bid_max.set(level),
            Side::Ask if self.ask_min.get() > level => self.ask_min.set(level),
            _ => {}
        }
    }

    /// Relay one matched event: the resting order's fill first, then the
    /// incoming order's, sharing one sequence number. Snapshots are taken
    /// here, after both sizes were decremented.
    fn relay_pair(&mut self, size: f64, resting: &OrderRef<T>, incoming: &Order<T>) {
        self.fill_seq += 1;
        let seq = self.fill_seq;
        let resting_snapshot = resting.borrow().clone();
        self.relay_fill(Fill {
            seq,
            size,
            order: resting_snapshot,
        });
        self.relay_fill(Fill {
            seq,
            size,
            order: incoming.clone(),
        });
    }

    fn relay_fill(&mut self, fill: Fill<T>) {
        match self.fill_listener.as_mut() {
            Some(listener) => listener(&fill),
            None => self.fills.push(fill),
        }
    }

    fn front_ref(&self, level: u64, side: Side) -> Option<OrderRef<T>> {
        self.levels
            .get(&level)
            .and_then(|entry| entry.queue(side).front())
            .cloned()
    }
}
