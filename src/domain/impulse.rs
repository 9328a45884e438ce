//! Impulse — a directional sequence of bars whose net move dominates its
//! internal retracement (§3).

use super::Direction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impulse {
    pub direction: Direction,
    pub start_idx: usize,
    pub end_idx: usize,
    pub start_price: f64,
    pub end_price: f64,
    /// `|end_price - start_price|`, strictly positive by construction.
    pub range: f64,
    pub extremum_high: f64,
    pub extremum_low: f64,
}

impl Impulse {
    pub fn duration(&self) -> usize {
        self.end_idx - self.start_idx + 1
    }
}
