//! Structure break (BOS) — a close that crosses the impulse extremum after a
//! pullback, taken as entry confirmation (§3).

use serde::{Deserialize, Serialize};

/// Which side of the impulse the confirming close broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confirmation {
    /// Bullish: close beyond `impulse.extremum_high`.
    CloseBeyondHigh,
    /// Bearish: close beyond `impulse.extremum_low`.
    CloseBeyondLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub entry_idx: usize,
    pub entry_price: f64,
    pub confirmation: Confirmation,
}
