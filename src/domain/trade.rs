//! TradeRecord — the simulator's full replay of a single pattern (§3, §4.7).

use super::Direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub entry_idx: usize,
    pub exit_idx: usize,
    pub entry_price: f64,
    pub exit_price: f64,
    pub direction: Direction,
    /// `|entry_price - stop_loss|`, strictly positive whenever a trade is emitted.
    pub risk: f64,
    /// `|take_profit - entry_price|` at the time the trade was opened.
    pub reward: f64,
    pub r_multiple: f64,
    pub timestamp: DateTime<Utc>,
}

impl TradeRecord {
    pub fn is_winner(&self) -> bool {
        self.r_multiple > 0.0
    }
}
