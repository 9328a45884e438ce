//! Direction — binary variant driving branch specialization instead of a
//! string-tagged "type" field (§9 redesign note).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    pub fn is_bullish(self) -> bool {
        matches!(self, Direction::Bullish)
    }

    /// +1.0 for bullish, -1.0 for bearish — for turning a signed price delta
    /// into a directional R-multiple without branching at every call site.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Bullish => 1.0,
            Direction::Bearish => -1.0,
        }
    }
}
