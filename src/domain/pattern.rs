//! Pattern — the assembled (impulse, pullback, structure) tuple, plus the
//! coarse forward-continuation flag computed alongside it (§3, §4.4).

use super::{Direction, Impulse, Pullback, Structure};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub impulse: Impulse,
    pub pullback: Pullback,
    pub structure: Structure,
    /// Coarse forward-look test: continuation >= 0.5 * impulse.range within 20
    /// bars of `structure.entry_idx`. Distinct from the labeler's binary
    /// outcome and the simulator's R-multiple (§3, open question 2).
    pub success_flag: bool,
    pub timestamp_of_impulse_start: DateTime<Utc>,
}

impl Pattern {
    pub fn direction(&self) -> Direction {
        self.impulse.direction
    }

    /// The "live scan" SL/TP convention from the original scanner: a fixed
    /// 0.3% buffer beyond the pullback extremum and a flat 2.0R target,
    /// independent of ATR. Deliberately not reused by the backtest labeler or
    /// simulator (see §9 open question 3 — this is a live-vs-backtest
    /// divergence the spec asks to surface, not unify).
    pub fn scan_recommendation(&self) -> ScanCandidate {
        const STOP_BUFFER_PCT: f64 = 0.003;
        const TARGET_RR: f64 = 2.0;

        let entry = self.structure.entry_price;
        let (stop_loss, take_profit) = if self.impulse.direction.is_bullish() {
            let sl = self.pullback.low * (1.0 - STOP_BUFFER_PCT);
            let risk = entry - sl;
            (sl, entry + TARGET_RR * risk)
        } else {
            let sl = self.pullback.high * (1.0 + STOP_BUFFER_PCT);
            let risk = sl - entry;
            (sl, entry - TARGET_RR * risk)
        };

        ScanCandidate {
            direction: self.impulse.direction,
            entry_idx: self.structure.entry_idx,
            entry_price: entry,
            stop_loss,
            take_profit,
        }
    }
}

/// Entry/SL/TP recommendation for a pattern detected at the tail of a live
/// window (§6 CLI surface: "keep patterns with entry_idx >= N-3").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanCandidate {
    pub direction: Direction,
    pub entry_idx: usize,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}
