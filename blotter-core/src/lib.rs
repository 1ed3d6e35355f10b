//! Blotter Core — trade ledger, position aggregation, history replay.
//!
//! This crate contains the heart of the blotter:
//! - Domain types (trade ids, trades, sides, positions)
//! - The ledger: sole mutation gateway keeping trades and derived positions
//!   consistent across add, amend, and cancel
//! - Running position aggregation (apply/revert fold rules)
//! - Exact as-of-date reconstruction by replaying trade history
//! - Mark-to-market valuation over the open positions

pub mod domain;
pub mod ledger;

pub use domain::{Position, Side, Symbol, Trade, TradeId};
pub use ledger::{Ledger, LedgerError};
