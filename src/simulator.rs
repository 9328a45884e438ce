//! Trade simulator (§4.7) — same SL/timeout shape as the labeler, but with a
//! two-target take-profit (fib extension vs. fixed-RR, conservative min/max)
//! and a full R-multiple outcome instead of a binary label.

use crate::config::RiskManagementConfig;
use crate::domain::{Bar, Direction, Pattern, TradeRecord};
use crate::labeler::labeler_stop_loss;

fn simulator_take_profit(entry_price: f64, sl: f64, pattern: &Pattern, config: &RiskManagementConfig) -> f64 {
    let risk = (entry_price - sl).abs();
    let impulse = &pattern.impulse;
    match pattern.direction() {
        Direction::Bullish => {
            let tp_ext = impulse.extremum_high + config.fib_extension * impulse.range;
            let tp_rr = entry_price + config.sim_rr_target * risk;
            tp_ext.min(tp_rr)
        }
        Direction::Bearish => {
            let tp_ext = impulse.extremum_low - config.fib_extension * impulse.range;
            let tp_rr = entry_price - config.sim_rr_target * risk;
            tp_ext.max(tp_rr)
        }
    }
}

/// Simulate a single pattern through to SL, TP, or timeout exit (§4.7).
///
/// Returns `None` when the bar series does not extend at least one bar past
/// `structure.entry_idx` — there is nothing to simulate.
pub fn simulate_trade(bars: &[Bar], pattern: &Pattern, config: &RiskManagementConfig) -> Option<TradeRecord> {
    let n = bars.len();
    let entry_idx = pattern.structure.entry_idx;
    if entry_idx + 1 >= n {
        return None;
    }

    let entry_price = pattern.structure.entry_price;
    let atr_at_pb_end = bars[pattern.pullback.end_idx].atr;
    let sl = labeler_stop_loss(pattern, atr_at_pb_end, config);
    let risk = (entry_price - sl).abs();
    let tp = simulator_take_profit(entry_price, sl, pattern, config);
    let reward = (tp - entry_price).abs();
    let direction = pattern.direction();

    let end = (entry_idx + config.max_bars_in_trade).min(n - 1);
    for (offset, b) in bars[entry_idx + 1..=end].iter().enumerate() {
        let idx = entry_idx + 1 + offset;
        match direction {
            Direction::Bullish => {
                if b.low <= sl {
                    return Some(trade_record(pattern, idx, sl, -1.0, risk, reward));
                }
                if b.high >= tp {
                    let r_multiple = if risk == 0.0 { 0.0 } else { reward / risk };
                    return Some(trade_record(pattern, idx, tp, r_multiple, risk, reward));
                }
            }
            Direction::Bearish => {
                if b.high >= sl {
                    return Some(trade_record(pattern, idx, sl, -1.0, risk, reward));
                }
                if b.low <= tp {
                    let r_multiple = if risk == 0.0 { 0.0 } else { reward / risk };
                    return Some(trade_record(pattern, idx, tp, r_multiple, risk, reward));
                }
            }
        }
    }

    let exit_idx = end;
    let exit_price = bars[exit_idx].close;
    let r_multiple = if risk == 0.0 {
        0.0
    } else {
        direction.sign() * (exit_price - entry_price) / risk
    };
    Some(trade_record(pattern, exit_idx, exit_price, r_multiple, risk, reward))
}

fn trade_record(pattern: &Pattern, exit_idx: usize, exit_price: f64, r_multiple: f64, risk: f64, reward: f64) -> TradeRecord {
    TradeRecord {
        entry_idx: pattern.structure.entry_idx,
        exit_idx,
        entry_price: pattern.structure.entry_price,
        exit_price,
        direction: pattern.direction(),
        risk,
        reward,
        r_multiple,
        timestamp: pattern.timestamp_of_impulse_start,
    }
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
    fn sl_hit_yields_r_multiple_of_minus_one() {
        let pattern = bullish_pattern(6, 100.0, 95.0);
        let mut bars = make_bars(&[(100.0, 100.0, 99.0, 100.0); 7]);
        bars.push((100.0, 108.0, 94.0, 100.0));
        for bar in &mut bars {
            bar.atr = 0.0;
        }
        let trade = simulate_trade(&bars, &pattern, &config()).unwrap();
        assert_eq!(trade.r_multiple, -1.0);
    }

    #[test]
    fn timeout_exit_uses_close_of_the_final_scan_bar() {
        // entry=100, sl=50 (risk=50), every scan bar stays well inside both
        // the sl and the (lower, extension-based) tp — the trade times out.
        let pattern = bullish_pattern(1, 100.0, 50.0);
        let rows = vec![(100.0, 102.0, 99.0, 101.0); 22];
        let mut bars = make_bars(&rows);
        for bar in &mut bars {
            bar.atr = 0.0;
        }
        let trade = simulate_trade(&bars, &pattern, &config()).unwrap();
        assert_eq!(trade.exit_idx, 21);
        assert!((trade.r_multiple - 0.02).abs() < 1e-9, "{trade:?}");
    }

    #[test]
    fn two_target_tp_picks_the_closer_of_extension_and_fixed_rr() {
        let pattern = bullish_pattern(6, 100.0, 95.0);
        // risk = 5, tp_rr = 100 + 2.5*5 = 112.5, tp_ext = 101 + 0.272*10 = 103.72
        // conservative min => 103.72
        let tp = simulator_take_profit(100.0, 95.0, &pattern, &config());
        assert!((tp - 103.72).abs() < 1e-9, "{tp}");
    }
}
