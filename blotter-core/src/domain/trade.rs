//! Trade — a single booked trade: immutable identity plus amendable economics.

use super::ids::TradeId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trade direction.
///
/// Quantity is always a magnitude; the side carries the sign. Keeping this a
/// closed two-variant enum keeps every fold/unfold dispatch exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// A booked trade.
///
/// `id`, `trade_date`, `symbol`, and `side` are fixed at booking time.
/// `quantity` and `price` are amendable, but only through the ledger so the
/// derived position stays consistent with the surviving history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    /// Calendar date the trade was struck. Not used by aggregation; drives
    /// the date-keyed queries and as-of replay.
    pub trade_date: NaiveDate,
    pub symbol: String,
    pub quantity: u32,
    pub price: f64,
    pub side: Side,
}

impl Trade {
    pub fn new(
        id: TradeId,
        trade_date: NaiveDate,
        symbol: impl Into<String>,
        quantity: u32,
        price: f64,
        side: Side,
    ) -> Self {
        Self {
            id,
            trade_date,
            symbol: symbol.into(),
            quantity,
            price,
            side,
        }
    }

    /// Signed quantity: positive for buys, negative for sells.
    pub fn signed_quantity(&self) -> i64 {
        match self.side {
            Side::Buy => i64::from(self.quantity),
            Side::Sell => -i64::from(self.quantity),
        }
    }

    /// Notional value at the booked price.
    pub fn notional(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}
