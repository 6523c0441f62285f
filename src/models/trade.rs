//! Trade records.

use rust_decimal::Decimal;
use serde::Deserialize;

/// A single executed trade as returned by `GET /trades/`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Trade {
    pub id: i64,
    /// External trade reference shown in the table.
    pub trade_id: String,
    pub trader: String,
    pub instrument: String,
    pub quantity: Decimal,
    pub price: Decimal,
    /// Trade direction, usually `"BUY"` or `"SELL"`.
    pub side: String,
    /// Lifecycle status such as `"pending"` or `"settled"`.
    pub status: String,
}

impl Trade {
    /// Status value counted by the pending-trades counter. Compared exactly.
    pub const PENDING: &'static str = "pending";

    pub fn is_pending(&self) -> bool {
        self.status == Self::PENDING
    }
}
