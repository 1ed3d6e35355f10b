//! Property tests for ledger invariants.
//!
//! Uses proptest to verify:
//! 1. Buy-only books track the volume-weighted mean exactly
//! 2. A fully-closing sell always flattens the position and resets the basis
//! 3. Amend round-trips restore quantity
//! 4. Rejected mutations leave the ledger untouched
//! 5. Replay agrees with the running fold when nothing was amended/cancelled

use blotter_core::{Ledger, LedgerError, Position, Side, Trade, TradeId};
use chrono::NaiveDate;
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_quantity() -> impl Strategy<Value = u32> {
    1..10_000u32
}

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 3).unwrap()
}

fn snapshot(ledger: &Ledger) -> (Vec<Trade>, Vec<Position>) {
    let mut trades: Vec<Trade> = ledger.trades().cloned().collect();
    trades.sort_by_key(|t| t.id);
    let mut positions: Vec<Position> = ledger.positions().cloned().collect();
    positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    (trades, positions)
}

// ── 1. Volume-Weighted Mean ──────────────────────────────────────────

proptest! {
    /// After every buy, the running average equals the volume-weighted mean
    /// of everything bought so far.
    #[test]
    fn buys_track_volume_weighted_mean(
        lots in prop::collection::vec((arb_quantity(), arb_price()), 1..20),
    ) {
        let mut ledger = Ledger::new();
        let mut total_quantity = 0u64;
        let mut total_value = 0.0f64;

        for (i, (quantity, price)) in lots.iter().enumerate() {
            ledger
                .add(Trade::new(
                    TradeId(i as u64),
                    day(),
                    "SPY",
                    *quantity,
                    *price,
                    Side::Buy,
                ))
                .unwrap();
            total_quantity += u64::from(*quantity);
            total_value += f64::from(*quantity) * price;

            let position = ledger.position("SPY").unwrap();
            prop_assert_eq!(position.quantity, total_quantity as i64);

            let expected = total_value / total_quantity as f64;
            prop_assert!((position.avg_entry_price - expected).abs() <= 1e-9 * expected);
        }
    }
}

// ── 2. Full Close Flattens ───────────────────────────────────────────

proptest! {
    /// A sell that exactly closes the long goes flat with a zero basis, for
    /// any quantities and prices.
    #[test]
    fn full_close_flattens(
        quantity in arb_quantity(),
        buy_price in arb_price(),
        sell_price in arb_price(),
    ) {
        let mut ledger = Ledger::new();
        ledger
            .add(Trade::new(TradeId(1), day(), "SPY", quantity, buy_price, Side::Buy))
            .unwrap();
        ledger
            .add(Trade::new(TradeId(2), day(), "SPY", quantity, sell_price, Side::Sell))
            .unwrap();

        let position = ledger.position("SPY").unwrap();
        prop_assert_eq!(position.quantity, 0);
        prop_assert_eq!(position.avg_entry_price, 0.0);
    }

    /// Mirror case: a buy that exactly covers the short also goes flat.
    #[test]
    fn full_cover_flattens(
        quantity in arb_quantity(),
        sell_price in arb_price(),
        buy_price in arb_price(),
    ) {
        let mut ledger = Ledger::new();
        ledger
            .add(Trade::new(TradeId(1), day(), "SPY", quantity, sell_price, Side::Sell))
            .unwrap();
        ledger
            .add(Trade::new(TradeId(2), day(), "SPY", quantity, buy_price, Side::Buy))
            .unwrap();

        let position = ledger.position("SPY").unwrap();
        prop_assert_eq!(position.quantity, 0);
        prop_assert_eq!(position.avg_entry_price, 0.0);
    }
}

// ── 3. Amend Round-Trip ──────────────────────────────────────────────

proptest! {
    /// Amending away and back restores the position quantity (the basis is
    /// documented as non-round-tripping).
    #[test]
    fn amend_round_trip_restores_quantity(
        quantity in arb_quantity(),
        price in arb_price(),
        other_quantity in arb_quantity(),
        other_price in arb_price(),
        new_quantity in arb_quantity(),
        new_price in arb_price(),
    ) {
        let mut ledger = Ledger::new();
        ledger
            .add(Trade::new(TradeId(1), day(), "SPY", quantity, price, Side::Buy))
            .unwrap();
        ledger
            .add(Trade::new(TradeId(2), day(), "SPY", other_quantity, other_price, Side::Buy))
            .unwrap();
        let before = ledger.position("SPY").unwrap().quantity;

        ledger.amend(TradeId(1), new_quantity, new_price).unwrap();
        ledger.amend(TradeId(1), quantity, price).unwrap();

        prop_assert_eq!(ledger.position("SPY").unwrap().quantity, before);
        prop_assert_eq!(ledger.trade(TradeId(1)).unwrap().quantity, quantity);
        prop_assert_eq!(ledger.trade(TradeId(1)).unwrap().price, price);
    }
}

// ── 4. Rejected Mutations Change Nothing ─────────────────────────────

proptest! {
    /// Unknown ids, duplicate ids, and bad economics all bounce without
    /// disturbing a single stored trade or position.
    #[test]
    fn rejected_mutations_leave_state_unchanged(
        quantity in arb_quantity(),
        price in arb_price(),
        side in arb_side(),
        bogus_id in 1_000u64..2_000,
    ) {
        let mut ledger = Ledger::new();
        ledger
            .add(Trade::new(TradeId(1), day(), "SPY", quantity, price, side))
            .unwrap();
        let before = snapshot(&ledger);

        prop_assert_eq!(
            ledger.cancel(TradeId(bogus_id)).unwrap_err(),
            LedgerError::UnknownTrade(TradeId(bogus_id))
        );
        prop_assert_eq!(
            ledger.amend(TradeId(bogus_id), quantity, price).unwrap_err(),
            LedgerError::UnknownTrade(TradeId(bogus_id))
        );
        prop_assert_eq!(
            ledger
                .add(Trade::new(TradeId(1), day(), "SPY", quantity, price, side))
                .unwrap_err(),
            LedgerError::DuplicateTrade(TradeId(1))
        );
        prop_assert_eq!(
            ledger.amend(TradeId(1), 0, price).unwrap_err(),
            LedgerError::InvalidQuantity
        );
        prop_assert_eq!(
            ledger.amend(TradeId(1), quantity, -price).unwrap_err(),
            LedgerError::InvalidPrice(-price)
        );

        prop_assert_eq!(snapshot(&ledger), before);
    }
}

// ── 5. Replay Agrees With the Running Fold ───────────────────────────

proptest! {
    /// With only adds (no amend/cancel), the as-of replay reproduces the
    /// running position exactly — same folds, same order.
    #[test]
    fn replay_matches_running_fold_for_pure_adds(
        trades in prop::collection::vec((arb_quantity(), arb_price(), arb_side()), 1..30),
    ) {
        let mut ledger = Ledger::new();
        for (i, (quantity, price, side)) in trades.iter().enumerate() {
            ledger
                .add(Trade::new(TradeId(i as u64), day(), "SPY", *quantity, *price, *side))
                .unwrap();
        }

        let running = ledger.position("SPY").unwrap();
        let replayed = ledger.position_as_of("SPY", day());
        prop_assert_eq!(replayed.quantity, running.quantity);
        prop_assert!((replayed.avg_entry_price - running.avg_entry_price).abs() < 1e-9);
    }
}
