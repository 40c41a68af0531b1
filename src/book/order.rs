//! Order records and identifiers accepted by the book.

use crate::book::error::BookError;
use crate::utils::current_time_millis;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier attached to an order by the caller.
///
/// Backed by a UUID. Feeds that key rows by integer index (snapshot row
/// numbers, exchange sequence numbers) can use [`OrderId::from_u64`];
/// callers that just need a fresh unique id use [`OrderId::new`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a new random (v4) order id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id derived from an integer key.
    #[must_use]
    pub fn from_u64(key: u64) -> Self {
        Self(Uuid::from_u128(u128::from(key)))
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two sides of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy side.
    Bid,
    /// Sell side.
    Ask,
}

impl Side {
    /// The side this side trades against.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Bid => "bid",
            Side::Ask => "ask",
        })
    }
}

impl FromStr for Side {
    type Err = BookError;

    /// Parse a side label.
    ///
    /// Accepts the book's own labels plus the `buy`/`sell` labels common in
    /// exchange feeds, case-insensitively.
    ///
    /// # Errors
    /// [`BookError::InvalidSide`] for anything else.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.to_ascii_lowercase().as_str() {
            "bid" | "buy" => Ok(Side::Bid),
            "ask" | "sell" => Ok(Side::Ask),
            _ => Err(BookError::InvalidSide(label.to_string())),
        }
    }
}

/// A single order submitted to the book.
///
/// The book takes ownership of submitted orders and mutates `size` in place
/// as fills consume it; a caller that also needs the original record must
/// pass a copy. `extra_fields` carries arbitrary caller data that rides
/// through fill snapshots intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order<T = ()> {
    /// Caller-supplied identifier; orders without one cannot be cancelled.
    pub id: Option<OrderId>,
    /// Which side of the book the order belongs to.
    pub side: Side,
    /// Limit price. `None` marks a market order; the book replaces it with a
    /// price that crosses the whole opposing side.
    pub price: Option<f64>,
    /// Remaining quantity. Decremented in place by fills.
    pub size: f64,
    /// Caller-supplied timestamp in milliseconds. Opaque to the engine;
    /// callers use it to pre-sort snapshot batches.
    pub timestamp: u64,
    /// Opaque caller payload carried through fills.
    pub extra_fields: T,
}

impl Order<()> {
    /// Limit order stamped with the current wall-clock time.
    #[must_use]
    pub fn limit(id: OrderId, side: Side, price: f64, size: f64) -> Self {
        Self {
            id: Some(id),
            side,
            price: Some(price),
            size,
            timestamp: current_time_millis(),
            extra_fields: (),
        }
    }

    /// Market order: no price, crosses whatever rests on the other side.
    #[must_use]
    pub fn market(id: OrderId, side: Side, size: f64) -> Self {
        Self {
            id: Some(id),
            side,
            price: None,
            size,
            timestamp: current_time_millis(),
            extra_fields: (),
        }
    }
}

impl<T> Order<T> {
    /// Replace the timestamp, builder style.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }
}
