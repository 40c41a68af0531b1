//! Core book state: level store, cursors, constructors and read views.

use super::fill::{Fill, FillListener};
use super::level::{Level, OrderRef};
use super::order::{Order, OrderId, Side};
use std::cell::Cell;
use std::collections::HashMap;

/// Smallest representable price increment, and the default tick size.
pub const SATOSHI: f64 = 1e-8;

/// Default price ceiling from which the highest addressable level derives.
pub const DEFAULT_MAX_PRICE: f64 = 1_000_000_000.0;

/// A single-asset limit order book with price-time priority matching.
///
/// Prices quantize to integer levels (`floor(price / tick_size)`); each
/// level holds a FIFO queue per side, materialized lazily on first touch and
/// never deallocated. Two roving cursors bound the candidate best levels:
/// `ask_min` (no resting ask strictly below it) and `bid_max` (no resting
/// bid strictly above it). The cursors may lag reality by one or more empty
/// levels; matching and the best-price views walk them inward on demand.
///
/// The book is single-threaded: operations are synchronous, hold no locks,
/// and must be driven from one owning executor. Submitted orders become
/// owned by the book and are mutated in place as fills consume them.
///
/// The type parameter `T` is an opaque caller payload carried on every
/// order and through every fill snapshot; see [`Order::extra_fields`].
pub struct LimitOrderBook<T = ()> {
    /// The symbol or identifier for this book.
    pub(super) symbol: String,

    /// Price quantum: prices map to levels as `floor(price / tick_size)`.
    pub(super) tick_size: f64,

    /// Construction-time price ceiling.
    pub(super) max_price: f64,

    /// Highest addressable level, `floor(max_price / tick_size)`. Orders
    /// can rest beyond it, but readers never walk past it.
    pub(super) max_level: u64,

    /// Lazily materialized price levels keyed by integer level.
    pub(super) levels: HashMap<u64, Level<T>>,

    /// Order-id back references used by cancellation. Points at the same
    /// heap records the level queues hold.
    pub(super) orders_by_id: HashMap<OrderId, OrderRef<T>>,

    /// Candidate lowest ask level. Invariant: no resting ask sits strictly
    /// below it. In a `Cell` because read views tighten it through `&self`.
    pub(super) ask_min: Cell<u64>,

    /// Candidate highest bid level. Invariant: no resting bid sits strictly
    /// above it.
    pub(super) bid_max: Cell<u64>,

    /// Monotone counter incremented only when a resting order outsizes the
    /// incoming one (the partial-fill exit of matching). Not a per-fill
    /// sequence number; see [`Fill::seq`].
    pub(super) trade_nonce: u64,

    /// Sequence number allocated once per matched event.
    pub(super) fill_seq: u64,

    /// In-memory fill log, appended to while no listener is installed.
    pub(super) fills: Vec<Fill<T>>,

    /// Optional fill callback that replaces the in-memory log.
    pub(super) fill_listener: Option<FillListener<T>>,
}

impl<T> LimitOrderBook<T> {
    /// Create a book with the default sizing: [`SATOSHI`] tick and a
    /// [`DEFAULT_MAX_PRICE`] ceiling.
    #[must_use]
    pub fn new(symbol: &str) -> Self {
        Self::with_tick_size(symbol, SATOSHI, DEFAULT_MAX_PRICE)
    }

    /// Create a book with an explicit tick size and price ceiling.
    ///
    /// # Panics
    /// Panics if `tick_size` or `max_price` is not strictly positive and
    /// finite.
    #[must_use]
    pub fn with_tick_size(symbol: &str, tick_size: f64, max_price: f64) -> Self {
        assert!(
            tick_size > 0.0 && tick_size.is_finite(),
            "tick_size must be a positive finite price increment"
        );
        assert!(
            max_price > 0.0 && max_price.is_finite(),
            "max_price must be a positive finite price"
        );
        let max_level = (max_price / tick_size).floor() as u64;
        Self {
            symbol: symbol.to_string(),
            tick_size,
            max_price,
            max_level,
            levels: HashMap::new(),
            orders_by_id: HashMap::new(),
            ask_min: Cell::new(max_level),
            // Level of the lowest quotable price, one tick.
            bid_max: Cell::new(1),
            trade_nonce: 0,
            fill_seq: 0,
            fills: Vec::new(),
            fill_listener: None,
        }
    }

    /// Create a book that routes fills to `listener` instead of the
    /// in-memory log.
    #[must_use]
    pub fn with_fill_listener(symbol: &str, listener: FillListener<T>) -> Self {
        let mut book = Self::new(symbol);
        book.fill_listener = Some(listener);
        book
    }

    /// Install or replace the fill listener.
    pub fn set_fill_listener(&mut self, listener: FillListener<T>) {
        self.fill_listener = Some(listener);
    }

    /// Remove the fill listener; subsequent fills append to the log again.
    pub fn remove_fill_listener(&mut self) {
        self.fill_listener = None;
    }

    /// Get the symbol of this book.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The configured price quantum.
    #[must_use]
    #[inline]
    pub fn tick_size(&self) -> f64 {
        self.tick_size
    }

    /// The configured price ceiling.
    #[must_use]
    #[inline]
    pub fn max_price(&self) -> f64 {
        self.max_price
    }

    /// Highest addressable level, `floor(max_price / tick_size)`.
    #[must_use]
    #[inline]
    pub fn max_level(&self) -> u64 {
        self.max_level
    }

    /// The current trade nonce.
    ///
    /// Incremented only on the partial-fill exit of matching; full-fill
    /// sweeps and pure insertions leave it unchanged.
    #[must_use]
    pub fn trade_nonce(&self) -> u64 {
        self.trade_nonce
    }

    /// Current candidate highest bid level. Diagnostic read; the true best
    /// may sit at or below it.
    #[must_use]
    pub fn bid_max(&self) -> u64 {
        self.bid_max.get()
    }

    /// Current candidate lowest ask level. Diagnostic read; the true best
    /// may sit at or above it.
    #[must_use]
    pub fn ask_min(&self) -> u64 {
        self.ask_min.get()
    }

    /// Number of resting orders that carry an id.
    #[must_use]
    pub fn open_orders(&self) -> usize {
        self.orders_by_id.len()
    }

    /// Fills relayed so far, oldest first. Empty while a listener is
    /// installed.
    #[must_use]
    pub fn fills(&self) -> &[Fill<T>] {
        &self.fills
    }

    /// Take the accumulated fills out of the log, leaving it empty.
    pub fn drain_fills(&mut self) -> Vec<Fill<T>> {
        std::mem::take(&mut self.fills)
    }

    /// Map a price to its integer level: `floor(price / tick_size)`.
    #[must_use]
    #[inline]
    pub fn price_to_level(&self, price: f64) -> u64 {
        (price / self.tick_size).floor() as u64
    }

    /// Map an integer level back to a price: `level * tick_size`.
    #[must_use]
    #[inline]
    pub fn level_to_price(&self, level: u64) -> f64 {
        level as f64 * self.tick_size
    }
}

impl<T> LimitOrderBook<T>
where
    T: Clone,
{
    /// Best resting bid, as a copy of the front order at the highest
    /// occupied bid level.
    ///
    /// The `bid_max` cursor may lag reality; this walks it downward one
    /// level at a time until a resting order appears, permanently
    /// tightening the cursor. Returns `None` once the walk exhausts
    /// level 0.
    #[must_use]
    pub fn best_bid(&self) -> Option<Order<T>> {
        loop {
            let cursor = self.bid_max.get();
            if let Some(order) = self.front_order(cursor, Side::Bid) {
                return Some(order);
            }
            if cursor == 0 {
                return None;
            }
            self.bid_max.set(cursor - 1);
        }
    }

    /// Best resting ask, walking `ask_min` upward through empty levels.
    ///
    /// Returns `None` once the walk passes `max_level`; orders parked
    /// beyond the ceiling are invisible here.
    #[must_use]
    pub fn best_ask(&self) -> Option<Order<T>> {
        loop {
            let cursor = self.ask_min.get();
            if cursor > self.max_level {
                return None;
            }
            if let Some(order) = self.front_order(cursor, Side::Ask) {
                return Some(order);
            }
            self.ask_min.set(cursor + 1);
        }
    }

    /// Price of the best resting bid, if any.
    #[must_use]
    pub fn best_bid_price(&self) -> Option<f64> {
        self.best_bid().and_then(|order| order.price)
    }

    /// Price of the best resting ask, if any.
    #[must_use]
    pub fn best_ask_price(&self) -> Option<f64> {
        self.best_ask().and_then(|order| order.price)
    }

    /// Midpoint of the best bid and ask prices.
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid_price(), self.best_ask_price()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Best-ask price minus best-bid price.
    #[must_use]
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid_price(), self.best_ask_price()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Copy of the resting order with `id`, if it is still on the book.
    #[must_use]
    pub fn get_order(&self, id: OrderId) -> Option<Order<T>> {
        self.orders_by_id.get(&id).map(|order| order.borrow().clone())
    }

    fn front_order(&self, level: u64, side: Side) -> Option<Order<T>> {
        self.levels
            .get(&level)
            .and_then(|entry| entry.queue(side).front())
            .map(|order| order.borrow().clone())
    }
}
