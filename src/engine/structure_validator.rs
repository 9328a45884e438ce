//! Structure validator (§4.3) — confirms breakout of the impulse extremum
//! after a pullback. Within a single bar, the breakout test is evaluated
//! before the invalidation test (§4.3 priority rule).

use crate::config::StructureRequirementsConfig;
use crate::domain::structure::Confirmation;
use crate::domain::{Bar, Direction, Impulse, Pullback, Structure};

pub fn validate_structure(
    bars: &[Bar],
    impulse: &Impulse,
    pullback: &Pullback,
    config: &StructureRequirementsConfig,
) -> Option<Structure> {
    let n = bars.len();
    let start = pullback.end_idx + 1;
    if start >= n {
        return None;
    }
    let end = (start + config.confirmation_scan_bars).min(n);

    for i in start..end {
        let close = bars[i].close;
        match impulse.direction {
            Direction::Bullish => {
                if close > impulse.extremum_high {
                    return Some(Structure {
                        entry_idx: i,
                        entry_price: close,
                        confirmation: Confirmation::CloseBeyondHigh,
                    });
                }
                if close < pullback.low {
                    return None;
                }
            }
            Direction::Bearish => {
                if close < impulse.extremum_low {
                    return Some(Structure {
                        entry_idx: i,
                        entry_price: close,
                        confirmation: Confirmation::CloseBeyondLow,
                    });
                }
                if close > pullback.high {
                    return None;
                }
            }
        }
    }
    None
}
