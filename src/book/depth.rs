//! Read-only depth projections over the level store.

use super::book::LimitOrderBook;
use super::level::Level;
use super::order::Side;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-level size totals, one row per materialized level.
///
/// `bid` and `ask` are `None` when the side has no resting size at the
/// level. Rows for levels whose queues have been emptied still appear: the
/// store never deallocates a level once touched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthLevel {
    /// Integer price level, `floor(price / tick_size)`.
    pub level: u64,
    /// The level's price, `level * tick_size`.
    pub price: f64,
    /// Total resting bid size, when positive.
    pub bid: Option<f64>,
    /// Total resting ask size, when positive.
    pub ask: Option<f64>,
}

impl<T> LimitOrderBook<T> {
    /// Per-level depth frame, ascending by level.
    ///
    /// Totals that are not strictly positive report as `None`.
    #[must_use]
    pub fn depth(&self) -> Vec<DepthLevel> {
        let ordered: BTreeMap<u64, &Level<T>> = self
            .levels
            .iter()
            .map(|(level, entry)| (*level, entry))
            .collect();
        ordered
            .into_iter()
            .map(|(level, entry)| DepthLevel {
                level,
                price: self.level_to_price(level),
                bid: positive(entry.total_size(Side::Bid)),
                ask: positive(entry.total_size(Side::Ask)),
            })
            .collect()
    }

    /// Cumulative depth frame, ascending by level.
    ///
    /// Bid totals accumulate from the highest occupied level downward: a
    /// row aggregates every bid at its own and all higher levels. Ask
    /// totals accumulate from the lowest level upward. Rows whose side
    /// total is missing stay missing; accumulation continues past them.
    #[must_use]
    pub fn cumulative_depth(&self) -> Vec<DepthLevel> {
        let mut rows = self.depth();
        let mut running = 0.0;
        for row in rows.iter_mut() {
            if let Some(ask) = row.ask {
                running += ask;
                row.ask = Some(running);
            }
        }
        running = 0.0;
        for row in rows.iter_mut().rev() {
            if let Some(bid) = row.bid {
                running += bid;
                row.bid = Some(running);
            }
        }
        rows
    }
}

fn positive(total: f64) -> Option<f64> {
    (total > 0.0).then_some(total)
}
