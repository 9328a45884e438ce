//! Pullback measurer (§4.2) — for a single impulse, finds the first valid
//! retracement. Non-greedy: the shortest valid length wins, matching
//! `original_source/pattern/pullback.py`'s `for length in range(1, max+1):
//! ... return` as soon as a length satisfies the Fibonacci band (and the
//! slowdown test, if enabled).

use crate::config::PullbackDetectionConfig;
use crate::domain::{Bar, Direction, Impulse, Pullback};

pub fn measure_pullback(bars: &[Bar], impulse: &Impulse, config: &PullbackDetectionConfig) -> Option<Pullback> {
    let n = bars.len();
    let start_idx = impulse.end_idx + 1;
    if start_idx >= n {
        return None;
    }

    let impulse_window = &bars[impulse.start_idx..=impulse.end_idx];
    let impulse_avg_body = mean(impulse_window.iter().map(|b| b.body()));

    for length in 1..=config.max_duration_candles {
        let end_idx = start_idx + length - 1;
        if end_idx >= n {
            break;
        }
        let window = &bars[start_idx..=end_idx];
        let window_low = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let window_high = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);

        // Invalidation is terminal: once the pullback trades through the
        // impulse extremum, no longer length can rescue it.
        match impulse.direction {
            Direction::Bullish => {
                if window_low < impulse.extremum_low {
                    return None;
                }
            }
            Direction::Bearish => {
                if window_high > impulse.extremum_high {
                    return None;
                }
            }
        }

        let depth = match impulse.direction {
            Direction::Bullish => (impulse.extremum_high - window_low) / impulse.range,
            Direction::Bearish => (window_high - impulse.extremum_low) / impulse.range,
        };

        if config.fib_range.min <= depth && depth <= config.fib_range.max {
            if config.require_slowdown {
                let pullback_avg_body = mean(window.iter().map(|b| b.body()));
                if pullback_avg_body >= impulse_avg_body {
                    // Slowdown not satisfied: skip this length, keep extending.
                    continue;
                }
            }
            return Some(Pullback {
                start_idx,
                end_idx,
                depth,
                low: window_low,
                high: window_high,
            });
        }
    }
    None
}

fn mean(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let count = values.clone().count();
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::make_bars;

    fn bullish_impulse() -> Impulse {
        Impulse {
            direction: Direction::Bullish,
            start_idx: 5,
            end_idx: 9,
            start_price: 100.0,
            end_price: 125.0,
            range: 25.0,
            extremum_high: 126.0,
            extremum_low: 99.0,
        }
    }

    fn base_config() -> PullbackDetectionConfig {
        PullbackDetectionConfig {
            max_duration_candles: 10,
            fib_range: crate::config::FibRange { min: 0.382, max: 0.786 },
            require_slowdown: false,
        }
    }

    #[test]
    fn accepts_first_length_within_fib_band() {
        let impulse = bullish_impulse();
        // bars 0..=9 are the impulse context (not consulted besides bodies),
        // bar 10 pulls back into the fib band immediately.
        let mut rows = vec![(100.0, 126.0, 99.0, 125.0); 10];
        rows.push((125.0, 125.0, 116.0, 117.0));
        rows.push((117.0, 118.0, 110.0, 112.0));
        let bars = make_bars(&rows);
        let pullback = measure_pullback(&bars, &impulse, &base_config());
        assert!(pullback.is_some());
        let pb = pullback.unwrap();
        assert_eq!(pb.start_idx, 10);
        assert!(pb.depth >= 0.382 && pb.depth <= 0.786);
    }

    #[test]
    fn invalidated_when_dipping_below_impulse_low() {
        let impulse = bullish_impulse();
        let mut rows = vec![(100.0, 126.0, 99.0, 125.0); 10];
        rows.push((125.0, 125.0, 98.0, 99.0));
        let bars = make_bars(&rows);
        let pullback = measure_pullback(&bars, &impulse, &base_config());
        assert!(pullback.is_none());
    }

    #[test]
    fn depth_exactly_at_fib_min_is_accepted() {
        let impulse = Impulse {
            direction: Direction::Bullish,
            start_idx: 0,
            end_idx: 0,
            start_price: 100.0,
            end_price: 100.0,
            range: 100.0,
            extremum_high: 200.0,
            extremum_low: 100.0,
        };
        // depth = (200 - low)/100 == 0.382 => low == 161.8
        let bars = make_bars(&[(200.0, 200.0, 199.0, 200.0), (200.0, 200.0, 161.8, 161.8)]);
        let mut config = base_config();
        config.fib_range.min = 0.382;
        let pullback = measure_pullback(&bars, &impulse, &config);
        assert!(pullback.is_some());
    }
}
