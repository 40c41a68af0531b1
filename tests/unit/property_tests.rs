//! Property tests over random order flow.

use limitbook::{LimitOrderBook, Order, OrderId, Side};
use proptest::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    /// One step of random flow: rest or cross a limit order, or cancel a
    /// previously submitted id (which may already be gone).
    #[derive(Debug, Clone)]
    enum Op {
        Limit { side: Side, price: u64, size: u32 },
        Cancel { key: u64 },
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (any::<bool>(), 1u64..=200, 1u32..=50).prop_map(|(bid, price, size)| Op::Limit {
                side: if bid { Side::Bid } else { Side::Ask },
                price,
                size,
            }),
            1 => (0u64..=255).prop_map(|key| Op::Cancel { key }),
        ]
    }

    fn test_book() -> LimitOrderBook<()> {
        LimitOrderBook::with_tick_size("PROP", 1.0, 10_000.0)
    }

    fn side_index(side: Side) -> usize {
        match side {
            Side::Bid => 0,
            Side::Ask => 1,
        }
    }

    proptest! {
        #[test]
        fn random_flow_preserves_book_invariants(
            ops in proptest::collection::vec(op_strategy(), 1..60)
        ) {
            let mut book = test_book();
            let mut next_id = 0u64;
            let mut submitted = [0.0f64; 2];
            let mut cancelled = [0.0f64; 2];

            for op in &ops {
                match op {
                    Op::Limit { side, price, size } => {
                        let id = OrderId::from_u64(next_id);
                        next_id += 1;
                        let order = Order::limit(id, *side, *price as f64, f64::from(*size));
                        prop_assert!(book.process_order(order).is_ok());
                        submitted[side_index(*side)] += f64::from(*size);
                    }
                    Op::Cancel { key } => {
                        if next_id == 0 {
                            continue;
                        }
                        let id = OrderId::from_u64(key % next_id);
                        match book.get_order(id) {
                            Some(resting) => {
                                cancelled[side_index(resting.side)] += resting.size;
                                prop_assert!(book.cancel_order(id).is_some());
                            }
                            None => prop_assert!(book.cancel_order(id).is_none()),
                        }
                    }
                }

                // Cursor safety and the non-crossed invariant hold after
                // every operation.
                let depth = book.depth();
                let best_bid = depth
                    .iter()
                    .filter(|row| row.bid.is_some())
                    .map(|row| row.level)
                    .max();
                let best_ask = depth
                    .iter()
                    .filter(|row| row.ask.is_some())
                    .map(|row| row.level)
                    .min();
                if let Some(level) = best_bid {
                    prop_assert!(level <= book.bid_max());
                }
                if let Some(level) = best_ask {
                    prop_assert!(level >= book.ask_min());
                }
                if let (Some(bid), Some(ask)) = (best_bid, best_ask) {
                    // Equality is reachable: a bid priced exactly at the
                    // candidate best ask rests instead of trading.
                    prop_assert!(bid <= ask);
                }
            }

            // Fill pairing: maker then taker, equal sizes, shared seq.
            let mut matched = [0.0f64; 2];
            prop_assert_eq!(book.fills().len() % 2, 0);
            for pair in book.fills().chunks(2) {
                prop_assert_eq!(pair[0].seq, pair[1].seq);
                prop_assert!((pair[0].size - pair[1].size).abs() < 1e-9);
                prop_assert_eq!(pair[0].order.side, pair[1].order.side.opposite());
                matched[side_index(pair[0].order.side)] += pair[0].size;
                matched[side_index(pair[1].order.side)] += pair[1].size;
            }

            // Size conservation per side: everything submitted was matched,
            // still rests, or left with a cancel.
            let depth = book.depth();
            let resting = [
                depth.iter().filter_map(|row| row.bid).sum::<f64>(),
                depth.iter().filter_map(|row| row.ask).sum::<f64>(),
            ];
            for side in [Side::Bid, Side::Ask] {
                let i = side_index(side);
                prop_assert!(
                    (submitted[i] - (matched[i] + resting[i] + cancelled[i])).abs() < 1e-6
                );
            }
        }

        #[test]
        fn fifo_within_a_level(sizes in proptest::collection::vec(1u32..=10, 1..6)) {
            let mut book = test_book();
            for (index, size) in sizes.iter().enumerate() {
                let order = Order::limit(
                    OrderId::from_u64(index as u64),
                    Side::Bid,
                    100.0,
                    f64::from(*size),
                );
                book.process_order(order).unwrap();
            }
            let total: u32 = sizes.iter().sum();
            book.process_order(Order::limit(
                OrderId::from_u64(999),
                Side::Ask,
                100.0,
                f64::from(total),
            ))
            .unwrap();

            // Resting bids fill in submission order, each exactly once.
            let fills = book.fills();
            prop_assert_eq!(fills.len(), sizes.len() * 2);
            for (index, pair) in fills.chunks(2).enumerate() {
                prop_assert_eq!(pair[0].order.id, Some(OrderId::from_u64(index as u64)));
                prop_assert!((pair[0].size - f64::from(sizes[index])).abs() < 1e-9);
            }
            prop_assert!(book.best_bid().is_none());
        }

        #[test]
        fn best_returns_an_equal_copy_of_a_lone_order(
            bid in any::<bool>(),
            price in 1u64..=500,
            size in 1u32..=100,
        ) {
            let mut book = test_book();
            let side = if bid { Side::Bid } else { Side::Ask };
            let order = Order::limit(OrderId::from_u64(7), side, price as f64, f64::from(size))
                .with_timestamp(42);
            book.process_order(order.clone()).unwrap();

            let best = match side {
                Side::Bid => book.best_bid(),
                Side::Ask => book.best_ask(),
            };
            prop_assert_eq!(best, Some(order));
        }

        #[test]
        fn cancel_twice_equals_cancel_once(price in 1u64..=200, size in 1u32..=50) {
            let mut book = test_book();
            let id = OrderId::from_u64(1);
            book.process_order(Order::limit(id, Side::Bid, price as f64, f64::from(size)))
                .unwrap();

            prop_assert!(book.cancel_order(id).is_some());
            let depth_after_first = book.depth();
            let open_after_first = book.open_orders();

            prop_assert!(book.cancel_order(id).is_none());
            prop_assert_eq!(book.depth(), depth_after_first);
            prop_assert_eq!(book.open_orders(), open_after_first);
        }
    }
}
