//! Mark-to-market valuation over the open positions.
//!
//! Marks are observations, not trades: they never touch quantity or basis,
//! only the valuation derived from them.

use super::Ledger;

impl Ledger {
    /// Record the latest observed market price for `symbol`.
    pub fn set_mark(&mut self, symbol: impl Into<String>, price: f64) {
        self.marks.insert(symbol.into(), price);
    }

    pub fn mark(&self, symbol: &str) -> Option<f64> {
        self.marks.get(symbol).copied()
    }

    /// Unrealized PnL for one instrument against its latest mark.
    ///
    /// `None` when the instrument has no open position or no mark.
    pub fn unrealized_pnl(&self, symbol: &str) -> Option<f64> {
        let position = self.positions.get(symbol).filter(|p| !p.is_flat())?;
        let mark = self.mark(symbol)?;
        Some(position.unrealized_pnl(mark))
    }

    /// Sum of `quantity * mark` over every open position with a mark.
    pub fn total_market_value(&self) -> f64 {
        self.positions
            .values()
            .filter(|p| !p.is_flat())
            .filter_map(|p| self.mark(&p.symbol).map(|m| p.market_value(m)))
            .sum()
    }

    /// Sum of unrealized PnL over every open position with a mark.
    pub fn total_unrealized_pnl(&self) -> f64 {
        self.positions
            .values()
            .filter(|p| !p.is_flat())
            .filter_map(|p| self.mark(&p.symbol).map(|m| p.unrealized_pnl(m)))
            .sum()
    }
}
