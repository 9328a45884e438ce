//! Pullback — a counter-trend retracement of an impulse, measured as a
//! Fibonacci-style ratio of impulse range (§3).

use super::Impulse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pullback {
    pub start_idx: usize,
    pub end_idx: usize,
    /// Retracement depth as a fraction of `impulse.range`.
    pub depth: f64,
    /// Lowest low across the pullback window (bullish) / highest high (bearish
    /// is carried in `high`, this is always the low side).
    pub low: f64,
    /// Highest high across the pullback window.
    pub high: f64,
}

impl Pullback {
    pub fn duration(&self) -> usize {
        self.end_idx - self.start_idx + 1
    }

    /// Parent impulse's extremum on the side a pullback would invalidate
    /// through — bullish pullbacks invalidate below `impulse.extremum_low`,
    /// bearish ones above `impulse.extremum_high`.
    pub fn invalidation_level(impulse: &Impulse) -> f64 {
        if impulse.direction.is_bullish() {
            impulse.extremum_low
        } else {
            impulse.extremum_high
        }
    }
}
