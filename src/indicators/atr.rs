//! Average True Range (ATR) precompute — indicator precompute stage (§2).
//!
//! Grounded on the teacher's `indicators::atr` (Wilder smoothing, true range
//! series) and `original_source/data/cleaner.py::calculate_indicators`, which
//! the spec treats as an external collaborator's "trivial rolling math" (§1)
//! but still lists as a pipeline stage (§2), so it is implemented here rather
//! than assumed away.
//!
//! True Range: `max(high-low, |high-prev_close|, |low-prev_close|)`.
//! ATR: Wilder smoothing (EMA with alpha = 1/period). Bars before the warmup
//! window (the first `period - 1` bars) get `NaN`, per §3's "first
//! (period-1) bars have no ATR and are ineligible as impulse starts".

use crate::domain::Bar;

/// True range series; `tr[0]` is `NaN` (no previous close to compare against).
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];
    if n == 0 {
        return tr;
    }
    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }
    tr
}

/// Wilder-smoothed series over `values`, seeded with the mean of the first
/// `period` non-NaN values and propagated forward with `alpha = 1/period`.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period + 1 {
        return result;
    }

    // TR[0] is always NaN; the seed window starts at index 1.
    let seed_start = 1;
    let seed_end = seed_start + period;
    if seed_end > n {
        return result;
    }
    if values[seed_start..seed_end].iter().any(|v| v.is_nan()) {
        return result;
    }

    let seed: f64 = values[seed_start..seed_end].iter().sum::<f64>() / period as f64;
    result[seed_end - 1] = seed;

    let alpha = 1.0 / period as f64;
    let mut prev = seed;
    for i in seed_end..n {
        if values[i].is_nan() {
            break;
        }
        let smoothed = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = smoothed;
        prev = smoothed;
    }
    result
}

/// Compute ATR(period) over a bar series.
pub fn atr(bars: &[Bar], period: usize) -> Vec<f64> {
    wilder_smooth(&true_range(bars), period)
}

/// Return a copy of `bars` with `atr` populated via [`atr`]. Indicator
/// precompute is a pure producer — it never mutates its input (§9 redesign
/// note: "the indicator precompute is a pure producer returning an augmented
/// bar array; downstream stages never mutate it").
pub fn with_atr(bars: &[Bar], period: usize) -> Vec<Bar> {
    let series = atr(bars, period);
    bars.iter()
        .zip(series)
        .map(|(bar, atr)| Bar { atr, ..*bar })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::make_bars;

    #[test]
    fn true_range_basic() {
        let bars = make_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
        ]);
        let tr = true_range(&bars);
        assert!(tr[0].is_nan());
        assert!((tr[1] - 8.0).abs() < 1e-9);
        assert!((tr[2] - 9.0).abs() < 1e-9);
    }

    #[test]
    fn true_range_gap_up() {
        let bars = make_bars(&[(98.0, 102.0, 97.0, 100.0), (110.0, 115.0, 108.0, 112.0)]);
        let tr = true_range(&bars);
        assert!((tr[1] - 15.0).abs() < 1e-9);
    }

    #[test]
    fn atr_warmup_is_nan() {
        let bars = make_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
        ]);
        let result = atr(&bars, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
    }

    #[test]
    fn atr_seeds_with_mean_of_period_values() {
        let bars = make_bars(&[
            (100.0, 105.0, 95.0, 102.0), // tr nan
            (102.0, 108.0, 100.0, 106.0), // tr 8
            (106.0, 107.0, 98.0, 99.0),  // tr 9
            (99.0, 103.0, 97.0, 101.0),  // tr 6
        ]);
        let result = atr(&bars, 3);
        assert!((result[3] - (8.0 + 9.0 + 6.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn with_atr_does_not_mutate_other_fields() {
        let bars = make_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
            (99.0, 103.0, 97.0, 101.0),
        ]);
        let augmented = with_atr(&bars, 3);
        for (original, aug) in bars.iter().zip(augmented.iter()) {
            assert_eq!(original.open, aug.open);
            assert_eq!(original.close, aug.close);
        }
        assert!((augmented[3].atr - (8.0 + 9.0 + 6.0) / 3.0).abs() < 1e-9);
    }
}
