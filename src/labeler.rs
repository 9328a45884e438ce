//! Labeler (§4.6) — derives SL/TP from the pullback extremum and ATR, then
//! forward-scans for the first of SL, TP, or timeout. SL is tested before TP
//! within the same bar (§8 boundary case: "both SL and TP in [low,high] ⇒ SL
//! wins").

use crate::config::RiskManagementConfig;
use crate::domain::{Bar, Direction, Label, Pattern};

/// Derive the labeler's SL/TP pair for `pattern` (§4.6). Exposed separately
/// from [`label_pattern`] so the simulator's boundary-case tests (§8 invariant
/// 4) can compare against the identical stop.
pub fn labeler_stop_loss(pattern: &Pattern, atr_at_pullback_end: f64, config: &RiskManagementConfig) -> f64 {
    let buffer = config.stop_loss.buffer_atr * atr_at_pullback_end;
    match pattern.direction() {
        Direction::Bullish => pattern.pullback.low - buffer,
        Direction::Bearish => pattern.pullback.high + buffer,
    }
}

fn labeler_take_profit(entry_price: f64, sl: f64, direction: Direction, config: &RiskManagementConfig) -> f64 {
    let risk = (entry_price - sl).abs();
    match direction {
        Direction::Bullish => entry_price + config.label_target_rr * risk,
        Direction::Bearish => entry_price - config.label_target_rr * risk,
    }
}

/// Run the forward-scan labeler over a single pattern (§4.6).
///
/// Returns `None` when the bar series does not extend far enough past
/// `structure.entry_idx` to run even one scan bar — such a pattern produces
/// no label rather than a synthetic timeout.
pub fn label_pattern(bars: &[Bar], pattern: &Pattern, config: &RiskManagementConfig) -> Option<Label> {
    let n = bars.len();
    let entry_idx = pattern.structure.entry_idx;
    if entry_idx + 1 >= n {
        return None;
    }

    let atr_at_pb_end = bars[pattern.pullback.end_idx].atr;
    let sl = labeler_stop_loss(pattern, atr_at_pb_end, config);
    let tp = labeler_take_profit(pattern.structure.entry_price, sl, pattern.direction(), config);

    let end = (entry_idx + config.max_bars_in_trade).min(n - 1);
    for b in &bars[entry_idx + 1..=end] {
        match pattern.direction() {
            Direction::Bullish => {
                if b.low <= sl {
                    return Some(Label::Loss);
                }
                if b.high >= tp {
                    return Some(Label::Success);
                }
            }
            Direction::Bearish => {
                if b.high >= sl {
                    return Some(Label::Loss);
                }
                if b.low <= tp {
                    return Some(Label::Success);
                }
            }
        }
    }
    Some(Label::Loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::structure::Confirmation;
    use crate::domain::{Impulse, Pullback, Structure};
    use crate::indicators::test_support::make_bars;

    fn config() -> RiskManagementConfig {
        RiskManagementConfig {
            max_bars_in_trade: 20,
            stop_loss: crate::config::StopLossConfig { buffer_atr: 0.0 },
            label_target_rr: 1.5,
            sim_rr_target: 2.5,
            fib_extension: 0.272,
        }
    }

    fn bullish_pattern(entry_idx: usize, entry_price: f64, pullback_low: f64) -> Pattern {
        Pattern {
            impulse: Impulse {
                direction: Direction::Bullish,
                start_idx: 0,
                end_idx: 4,
                start_price: 90.0,
                end_price: 100.0,
                range: 10.0,
                extremum_high: 101.0,
                extremum_low: 89.0,
            },
            pullback: Pullback {
                start_idx: 5,
                end_idx: entry_idx - 1,
                depth: 0.5,
                low: pullback_low,
                high: 100.0,
            },
            structure: Structure {
                entry_idx,
                entry_price,
                confirmation: Confirmation::CloseBeyondHigh,
            },
            success_flag: true,
            timestamp_of_impulse_start: chrono::Utc::now(),
        }
    }

    #[test]
    fn sl_hit_before_tp_within_same_bar_yields_loss() {
        // sl = 95, tp = entry + 1.5*(entry-sl) = 100 + 1.5*5 = 107.5
        let pattern = bullish_pattern(6, 100.0, 95.0);
        let mut bars = make_bars(&[(100.0, 100.0, 99.0, 100.0); 7]);
        bars.push((100.0, 108.0, 94.0, 100.0)); // both sl and tp touched in one bar
        for bar in &mut bars {
            bar.atr = 0.0;
        }
        let label = label_pattern(&bars, &pattern, &config());
        assert_eq!(label, Some(Label::Loss));
    }

    #[test]
    fn tp_hit_without_sl_yields_success() {
        let pattern = bullish_pattern(6, 100.0, 95.0);
        let mut bars = make_bars(&[(100.0, 100.0, 99.0, 100.0); 7]);
        bars.push((100.0, 108.0, 96.0, 107.0)); // tp=107.5 not quite, bump next bar
        bars.push((107.0, 109.0, 106.0, 108.0));
        for bar in &mut bars {
            bar.atr = 0.0;
        }
        let label = label_pattern(&bars, &pattern, &config());
        assert_eq!(label, Some(Label::Success));
    }

    #[test]
    fn timeout_without_either_level_yields_loss() {
        let pattern = bullish_pattern(6, 100.0, 95.0);
        let mut rows = vec![(100.0, 100.0, 99.0, 100.0); 7];
        rows.extend(vec![(100.0, 102.0, 98.0, 101.0); 20]);
        let mut bars = make_bars(&rows);
        for bar in &mut bars {
            bar.atr = 0.0;
        }
        let label = label_pattern(&bars, &pattern, &config());
        assert_eq!(label, Some(Label::Loss));
    }

    #[test]
    fn atr_buffer_widens_stop_below_pullback_low() {
        let pattern = bullish_pattern(6, 100.0, 95.0);
        let mut config = config();
        config.stop_loss.buffer_atr = 1.0;
        let sl = labeler_stop_loss(&pattern, 2.0, &config);
        assert_eq!(sl, 93.0);
    }
}
