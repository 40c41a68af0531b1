//! Fill notifications emitted by the matching core.

use super::order::Order;
use serde::Serialize;

/// A single fill notification.
///
/// Every matched event produces exactly two fills sharing one `seq`: first
/// the resting (maker) order, then the incoming (taker) order. `order` is a
/// deep copy taken at relay time, after the match decremented both sizes, so
/// later mutation of the live order cannot corrupt history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill<T = ()> {
    /// Fill sequence number: monotone per book, allocated once per matched
    /// event and shared by its maker and taker fills. Unlike the trade
    /// nonce, this counts every match.
    pub seq: u64,
    /// Quantity traded in this event.
    pub size: f64,
    /// Snapshot of the order at relay time.
    pub order: Order<T>,
}

/// Callback receiving fills as they are relayed.
///
/// While a listener is installed, fills are delivered to it instead of the
/// book's in-memory log. Matching is synchronous, so a listener must not
/// block on the hot path; publish to a queue and drain elsewhere.
pub type FillListener<T> = Box<dyn FnMut(&Fill<T>)>;
