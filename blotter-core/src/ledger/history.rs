//! Date-keyed queries and exact position reconstruction.
//!
//! The running fold in [`Position`] is deliberately lossy on revert; when the
//! exact basis matters the ledger replays the full surviving trade history in
//! chronological order instead.

use super::{Ledger, LedgerError};
use crate::domain::{Position, Symbol, Trade, TradeId};
use chrono::NaiveDate;
use std::collections::HashMap;

impl Ledger {
    /// All booked trades with `start <= trade_date <= end`, ordered by date
    /// then id.
    pub fn trades_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Trade> {
        let mut trades: Vec<&Trade> = self
            .trades
            .values()
            .filter(|t| t.trade_date >= start && t.trade_date <= end)
            .collect();
        trades.sort_by_key(|t| (t.trade_date, t.id));
        trades
    }

    /// Amend the trade booked for `symbol` on `date`.
    ///
    /// Returns the id of the amended trade so callers can follow up by id.
    pub fn amend_by_date(
        &mut self,
        symbol: &str,
        date: NaiveDate,
        new_quantity: u32,
        new_price: f64,
    ) -> Result<TradeId, LedgerError> {
        let id = self
            .trades
            .values()
            .find(|t| t.symbol == symbol && t.trade_date == date)
            .map(|t| t.id)
            .ok_or_else(|| LedgerError::NoTradeOnDate {
                symbol: symbol.to_string(),
                date,
            })?;
        self.amend(id, new_quantity, new_price)?;
        Ok(id)
    }

    /// Exact position for `symbol` as of end of `date`, rebuilt by replaying
    /// every surviving trade in chronological order into a fresh position.
    ///
    /// Returns a flat zero-state position if nothing traded on or before
    /// `date`.
    pub fn position_as_of(&self, symbol: &str, date: NaiveDate) -> Position {
        let mut trades: Vec<&Trade> = self
            .trades
            .values()
            .filter(|t| t.symbol == symbol && t.trade_date <= date)
            .collect();
        trades.sort_by_key(|t| (t.trade_date, t.id));

        let mut position = Position::new(symbol);
        for trade in trades {
            position.apply(trade);
        }
        position
    }

    /// As-of snapshot across every instrument traded on or before `date`.
    pub fn positions_as_of(&self, date: NaiveDate) -> HashMap<Symbol, Position> {
        let mut trades: Vec<&Trade> = self
            .trades
            .values()
            .filter(|t| t.trade_date <= date)
            .collect();
        trades.sort_by_key(|t| (t.trade_date, t.id));

        let mut positions: HashMap<Symbol, Position> = HashMap::new();
        for trade in trades {
            positions
                .entry(trade.symbol.clone())
                .or_insert_with_key(|symbol| Position::new(symbol.clone()))
                .apply(trade);
        }
        positions
    }

    /// Day-by-day as-of snapshots for one instrument over a date range,
    /// both endpoints included.
    pub fn position_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(NaiveDate, Position)> {
        let mut history = Vec::new();
        let mut date = start;
        while date <= end {
            history.push((date, self.position_as_of(symbol, date)));
            let Some(next) = date.succ_opt() else { break };
            date = next;
        }
        history
    }
}
