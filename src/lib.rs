//! # Single-Asset Limit Order Book Engine
//!
//! A limit order book implementation with a price-time priority matching
//! engine, written for single-threaded, synchronous operation. The book is a
//! library component: callers feed it orders (from a snapshot loader, a
//! market-data stream, or a simulator) and it matches, rests, cancels, and
//! reports fills and depth.
//!
//! ## Key Features
//!
//! - **Integer price levels**: prices quantize to levels via a configurable
//!   tick size (`floor(price / tick_size)`), with lazy level materialization
//!   so sparse books stay cheap.
//!
//! - **Cursor-driven matching**: two roving cursors (`bid_max`, `ask_min`)
//!   bound the candidate best levels and sweep inward through empty levels,
//!   giving a linear-time crossing path with strict FIFO time priority
//!   within a level.
//!
//! - **Partial and full fills**: incoming orders consume resting liquidity
//!   best-price-first; remainders rest on the book. Resting orders are
//!   mutated in place as fills shrink them.
//!
//! - **Fill relay**: every matched event emits a pair of fill snapshots
//!   (resting order first, incoming order second) to an in-memory log or an
//!   installed listener callback.
//!
//! - **Depth views**: per-level size frames and cumulative depth
//!   projections over every materialized level.
//!
//! ## Scheduling Model
//!
//! The book is **single-threaded and cooperative**. All operations are
//! synchronous and run to completion; the engine holds no locks and must not
//! be mutated from multiple executors. Callers feeding events from a network
//! listener should serialize them onto one owning task.
//!
//! ## Example
//!
//! ```
//! use limitbook::{LimitOrderBook, Order, OrderId, Side};
//!
//! let mut book: LimitOrderBook = LimitOrderBook::with_tick_size("BTC-USD", 0.01, 1_000_000.0);
//!
//! book.process_order(Order::limit(OrderId::from_u64(1), Side::Bid, 100.00, 5.0)).unwrap();
//! book.process_order(Order::limit(OrderId::from_u64(2), Side::Ask, 100.00, 2.0)).unwrap();
//!
//! assert_eq!(book.fills().len(), 2); // one matched event, maker + taker
//! assert_eq!(book.best_bid().map(|o| o.size), Some(3.0));
//! ```

pub mod book;
pub mod prelude;
mod utils;

pub use book::depth::DepthLevel;
pub use book::fill::{Fill, FillListener};
pub use book::order::{Order, OrderId, Side};
pub use book::{BookError, DEFAULT_MAX_PRICE, LimitOrderBook, SATOSHI};
pub use utils::current_time_millis;

/// Default type alias for `LimitOrderBook<()>` representing the most common
/// use case.
///
/// This is the recommended type when orders carry no extra caller data. It
/// provides the full order book functionality with unit type `()` as the
/// extra fields parameter.
pub type DefaultLimitOrderBook = LimitOrderBook<()>;
