//! Position — running net exposure and cost basis for one instrument.

use super::trade::{Side, Trade};
use serde::{Deserialize, Serialize};

/// Net position for a single instrument.
///
/// `quantity` is signed: positive = net long, negative = net short, zero =
/// flat. `avg_entry_price` is the volume-weighted average of the buy layers
/// still contributing to the position and is exactly 0.0 whenever the
/// position is flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: i64,
    pub avg_entry_price: f64,
}

impl Position {
    /// Fresh flat position.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            quantity: 0,
            avg_entry_price: 0.0,
        }
    }

    pub fn is_long(&self) -> bool {
        self.quantity > 0
    }

    pub fn is_short(&self) -> bool {
        self.quantity < 0
    }

    pub fn is_flat(&self) -> bool {
        self.quantity == 0
    }

    pub fn market_value(&self, current_price: f64) -> f64 {
        self.quantity as f64 * current_price
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.quantity as f64 * (current_price - self.avg_entry_price)
    }

    /// Fold a trade's effect into the running state.
    ///
    /// A buy re-weights the average entry price over the combined quantity;
    /// a sell shrinks (or flips) the exposure at the existing basis and never
    /// recomputes the average. Either side landing the position exactly flat
    /// resets the basis to zero — for buys the check runs before the
    /// division, so a buy that exactly covers a short cannot divide by zero.
    pub fn apply(&mut self, trade: &Trade) {
        match trade.side {
            Side::Buy => {
                let bought = i64::from(trade.quantity);
                let new_qty = self.quantity + bought;
                self.avg_entry_price = if new_qty == 0 {
                    0.0
                } else {
                    (self.avg_entry_price * self.quantity as f64
                        + trade.price * bought as f64)
                        / new_qty as f64
                };
                self.quantity = new_qty;
            }
            Side::Sell => {
                self.quantity -= i64::from(trade.quantity);
                if self.quantity == 0 {
                    self.avg_entry_price = 0.0;
                }
            }
        }
    }

    /// Reverse a previously-applied trade's quantity effect.
    ///
    /// Approximate inverse: the quantity delta is undone exactly, but the
    /// average entry price that existed before the original `apply` was
    /// overwritten and is not reconstructed. Amend re-applies immediately;
    /// cancel accepts the stale basis. `Ledger::position_as_of` replays the
    /// surviving history when the exact figure matters.
    pub fn revert(&mut self, trade: &Trade) {
        match trade.side {
            Side::Buy => self.quantity -= i64::from(trade.quantity),
            Side::Sell => self.quantity += i64::from(trade.quantity),
        }
        if self.quantity == 0 {
            self.avg_entry_price = 0.0;
        }
    }
}
