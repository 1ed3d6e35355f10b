//! Ledger — sole mutation gateway over trades and derived positions.
//!
//! Every mutation funnels through [`Ledger`]: `add` folds the trade into its
//! instrument's position, `amend` reverts the old economics and re-applies
//! the new ones, `cancel` reverts and removes. Positions are created lazily
//! on first trade and never deleted, so a flat instrument keeps its
//! zero-state record.

mod history;
mod marks;

use crate::domain::{Position, Symbol, Trade, TradeId};
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("trade {0} not found")]
    UnknownTrade(TradeId),

    #[error("trade {0} already booked")]
    DuplicateTrade(TradeId),

    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("price must be positive and finite, got {0}")]
    InvalidPrice(f64),

    #[error("no {symbol} trade on {date}")]
    NoTradeOnDate { symbol: Symbol, date: NaiveDate },
}

/// Owns every trade and every derived position.
///
/// Trades are keyed by id, positions by instrument symbol. Callers only ever
/// see shared references, so the pair of maps can never drift apart behind
/// the ledger's back.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    trades: HashMap<TradeId, Trade>,
    positions: HashMap<Symbol, Position>,
    marks: HashMap<Symbol, f64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book a new trade and fold it into its instrument's position.
    ///
    /// Rejects an id that is already booked; re-booking under the same id
    /// would fold the economics into the position a second time while the
    /// stored trade is only replaced once.
    pub fn add(&mut self, trade: Trade) -> Result<(), LedgerError> {
        validate_economics(trade.quantity, trade.price)?;
        if self.trades.contains_key(&trade.id) {
            return Err(LedgerError::DuplicateTrade(trade.id));
        }

        self.positions
            .entry(trade.symbol.clone())
            .or_insert_with_key(|symbol| Position::new(symbol.clone()))
            .apply(&trade);
        self.trades.insert(trade.id, trade);
        Ok(())
    }

    /// Amend a booked trade's quantity and price.
    ///
    /// The old economics are reverted before the new ones are folded back in,
    /// so the position never double-counts. Validation runs first; a rejected
    /// amend leaves both the trade and the position untouched. Side and date
    /// are not amendable.
    pub fn amend(
        &mut self,
        id: TradeId,
        new_quantity: u32,
        new_price: f64,
    ) -> Result<(), LedgerError> {
        validate_economics(new_quantity, new_price)?;
        let trade = self
            .trades
            .get_mut(&id)
            .ok_or(LedgerError::UnknownTrade(id))?;
        let position = self
            .positions
            .entry(trade.symbol.clone())
            .or_insert_with_key(|symbol| Position::new(symbol.clone()));

        position.revert(trade);
        trade.quantity = new_quantity;
        trade.price = new_price;
        position.apply(trade);
        Ok(())
    }

    /// Cancel a booked trade: revert its effect and drop it from storage.
    ///
    /// Returns the removed trade. The instrument's position is retained even
    /// if the cancel leaves it flat.
    pub fn cancel(&mut self, id: TradeId) -> Result<Trade, LedgerError> {
        let trade = self
            .trades
            .remove(&id)
            .ok_or(LedgerError::UnknownTrade(id))?;
        self.positions
            .entry(trade.symbol.clone())
            .or_insert_with_key(|symbol| Position::new(symbol.clone()))
            .revert(&trade);
        Ok(trade)
    }

    /// Current position for `symbol`, or `None` if no trade has ever touched
    /// the instrument.
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Every position the ledger has ever created, flat ones included.
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.values()
    }

    pub fn trade(&self, id: TradeId) -> Option<&Trade> {
        self.trades.get(&id)
    }

    pub fn trades(&self) -> impl Iterator<Item = &Trade> {
        self.trades.values()
    }

    /// Number of booked (non-cancelled) trades.
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

fn validate_economics(quantity: u32, price: f64) -> Result<(), LedgerError> {
    if quantity == 0 {
        return Err(LedgerError::InvalidQuantity);
    }
    if !price.is_finite() || price <= 0.0 {
        return Err(LedgerError::InvalidPrice(price));
    }
    Ok(())
}
