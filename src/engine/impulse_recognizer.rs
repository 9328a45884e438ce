//! Impulse recognizer (§4.1) — enumerates candidate directional moves.
//!
//! For each start bar `i` and each direction, candidate lengths are tried
//! shortest-first and the first one that passes all three tests wins
//! (first-length-wins, §9 redesign note: "impulse recognizer is
//! `first-length-wins per (i, direction)`"). A single start bar can therefore
//! produce at most two impulses, one per direction, evaluated independently.

use crate::config::ImpulseDetectionConfig;
use crate::domain::{Bar, Direction, Impulse};

/// Enumerate every accepted impulse over `bars` under `config`.
///
/// Impulses are emitted in ascending `start_idx` order (within a start index,
/// bullish before bearish), satisfying the pipeline's monotonic-indexing
/// guarantee (§8 invariant 7) before any downstream stage runs.
pub fn detect_impulses(bars: &[Bar], config: &ImpulseDetectionConfig) -> Vec<Impulse> {
    let n = bars.len();
    let min_candles = config.min_candles;
    if min_candles == 0 || n < min_candles {
        return Vec::new();
    }

    let mut impulses = Vec::new();
    for i in 0..=(n - min_candles) {
        if !bars[i].atr.is_finite() {
            tracing::trace!(bar = i, "skipping impulse start: ATR not yet warmed up");
            continue;
        }

        if let Some(imp) = scan_direction(bars, config, i, Direction::Bullish) {
            impulses.push(imp);
        }
        if let Some(imp) = scan_direction(bars, config, i, Direction::Bearish) {
            impulses.push(imp);
        }
    }
    impulses
}

fn scan_direction(bars: &[Bar], config: &ImpulseDetectionConfig, i: usize, direction: Direction) -> Option<Impulse> {
    let n = bars.len();
    let atr_i = bars[i].atr;

    for length in config.min_candles..(config.min_candles + config.length_span) {
        let end = i + length - 1;
        if end >= n {
            break;
        }
        let window = &bars[i..=end];

        let start_price = bars[i].open;
        let end_price = bars[end].close;
        let extremum_high = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let extremum_low = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let total_range = extremum_high - extremum_low;

        let net_move = match direction {
            Direction::Bullish => end_price - start_price,
            Direction::Bearish => start_price - end_price,
        };
        if net_move <= 0.0 {
            continue;
        }
        if total_range <= 0.0 {
            continue;
        }

        let body_sum: f64 = window.iter().map(|b| b.body()).sum();
        if body_sum / total_range < config.min_body_ratio {
            continue;
        }

        let internal_retr = match direction {
            Direction::Bullish => (extremum_high - end_price) / net_move,
            Direction::Bearish => (end_price - extremum_low) / net_move,
        };

        if net_move >= config.min_atr_multiplier * atr_i && internal_retr <= config.max_internal_retracement {
            return Some(Impulse {
                direction,
                start_idx: i,
                end_idx: end,
                start_price,
                end_price,
                range: net_move,
                extremum_high,
                extremum_low,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::make_bars;

    fn config() -> ImpulseDetectionConfig {
        ImpulseDetectionConfig {
            min_candles: 4,
            length_span: 10,
            min_atr_multiplier: 1.0,
            min_body_ratio: 0.5,
            max_internal_retracement: 0.5,
        }
    }

    fn bullish_bars() -> Vec<Bar> {
        let mut bars = make_bars(&[
            (100.0, 100.0, 99.0, 100.0),
            (100.0, 100.0, 99.0, 100.0),
            (100.0, 100.0, 99.0, 100.0),
            (100.0, 100.0, 99.0, 100.0),
            (100.0, 100.0, 99.0, 100.0),
            (100.0, 106.0, 99.0, 105.0),
            (105.0, 111.0, 104.0, 110.0),
            (110.0, 116.0, 109.0, 115.0),
            (115.0, 121.0, 114.0, 120.0),
            (120.0, 125.0, 119.0, 125.0),
        ]);
        for bar in &mut bars {
            bar.atr = 5.0;
        }
        bars
    }

    #[test]
    fn detects_clean_bullish_impulse() {
        let bars = bullish_bars();
        let impulses = detect_impulses(&bars, &config());
        let found = impulses.iter().find(|i| i.direction == Direction::Bullish && i.start_idx == 5);
        assert!(found.is_some(), "{impulses:?}");
        let imp = found.unwrap();
        assert!(imp.end_idx >= 8 && imp.end_idx <= 9);
        assert!(imp.range > 0.0);
    }

    #[test]
    fn zero_atr_start_is_rejected() {
        let mut bars = bullish_bars();
        bars[5].atr = f64::NAN;
        let impulses = detect_impulses(&bars, &config());
        assert!(!impulses.iter().any(|i| i.start_idx == 5));
    }

    #[test]
    fn flat_window_produces_no_impulse() {
        let mut bars = make_bars(&[(100.0, 100.0, 100.0, 100.0); 8]);
        for bar in &mut bars {
            bar.atr = 1.0;
        }
        let impulses = detect_impulses(&bars, &config());
        assert!(impulses.is_empty());
    }

    #[test]
    fn emitted_impulses_are_ordered_by_start_idx() {
        let bars = bullish_bars();
        let impulses = detect_impulses(&bars, &config());
        let starts: Vec<usize> = impulses.iter().map(|i| i.start_idx).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn body_ratio_at_threshold_is_accepted() {
        // net_move == total_range (full-body candles) => body_ratio == 1.0 >= any threshold <= 1.0.
        let mut config = config();
        config.min_body_ratio = 1.0;
        config.min_candles = 2;
        config.length_span = 1;
        let mut bars = make_bars(&[(100.0, 100.0, 100.0, 100.0), (100.0, 105.0, 100.0, 105.0)]);
        for bar in &mut bars {
            bar.atr = 1.0;
        }
        let impulses = detect_impulses(&bars, &config);
        assert!(impulses.iter().any(|i| i.direction == Direction::Bullish));
    }
}
