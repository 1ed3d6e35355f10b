use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-assigned trade identifier, unique within a ledger for the trade's
/// lifetime. The ledger never generates ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TradeId(pub u64);

impl TradeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for TradeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
