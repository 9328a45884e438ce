//! Feature extractor (§4.5) — derives the fixed-order numeric descriptors for
//! a single pattern. Every ratio has a named fallback for a zero denominator;
//! none of them ever raise (§7 `NumericDegenerate` is defaulted, not raised).

use crate::domain::{Bar, FeatureVector, Pattern};

/// Extract a `FeatureVector` for `pattern` against its originating bar series.
pub fn extract_features(bars: &[Bar], pattern: &Pattern) -> FeatureVector {
    let impulse = &pattern.impulse;
    let pullback = &pattern.pullback;
    let structure = &pattern.structure;

    let impulse_window = &bars[impulse.start_idx..=impulse.end_idx];
    let pullback_window = &bars[pullback.start_idx..=pullback.end_idx];

    let mean_atr = mean(impulse_window.iter().map(|b| b.atr));
    let impulse_range_atr = if mean_atr == 0.0 { 0.0 } else { impulse.range / mean_atr };

    let impulse_bodies: Vec<f64> = impulse_window.iter().map(|b| b.body()).collect();
    let pullback_bodies: Vec<f64> = pullback_window.iter().map(|b| b.body()).collect();
    let impulse_body_std = stddev(&impulse_bodies);
    let pullback_body_std = stddev(&pullback_bodies);
    let volatility_contraction = if impulse_body_std == 0.0 {
        1.0
    } else {
        pullback_body_std / impulse_body_std
    };

    let last_pullback_bar = &bars[pullback.end_idx];
    let pullback_range = last_pullback_bar.range();
    let extremum_wick_ratio = if pullback_range == 0.0 {
        0.0
    } else {
        (pullback_range - last_pullback_bar.body()) / pullback_range
    };

    let breakout_bar = &bars[structure.entry_idx];
    let breakout_range = breakout_bar.range();
    let structure_break_strength = if breakout_range == 0.0 {
        0.0
    } else {
        breakout_bar.body() / breakout_range
    };

    let mean_impulse_volume = mean(impulse_window.iter().map(|b| b.volume));
    let mean_pullback_volume = mean(pullback_window.iter().map(|b| b.volume));
    let volume_ratio = if mean_pullback_volume == 0.0 {
        1.0
    } else {
        mean_impulse_volume / mean_pullback_volume
    };

    FeatureVector {
        impulse_range_atr,
        impulse_duration: impulse.duration() as f64,
        pullback_depth: pullback.depth,
        pullback_duration: pullback.duration() as f64,
        volatility_contraction,
        extremum_wick_ratio,
        structure_break_strength,
        volume_ratio,
        is_bullish: if pattern.direction().is_bullish() { 1.0 } else { 0.0 },
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`, not `n-1`). A single-bar
/// pullback window is a normal input here — §4.2 allows `pullback.duration()
/// == 1` — and a sample stddev (`n-1` in the denominator) is undefined for
/// `n == 1`, which would put a `NaN` into `volatility_contraction` and
/// violate the "every feature is finite" invariant. Population variance is
/// well-defined (zero) for `n == 1`, so it is used for both the impulse and
/// pullback windows rather than switching formulas by window length.
fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
