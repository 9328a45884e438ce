//! Swing markers — advisory local-high/local-low flags (§6 input contract:
//! "swing markers optional and advisory only"). Never consulted by the
//! recognizers; exposed only for callers/reporting.
//!
//! Grounded on `original_source/data/cleaner.py::identify_swings`: a bar is a
//! swing high/low if it is the max/min within a centered `2*window+1` window.

use crate::domain::Bar;

pub fn identify_swings(bars: &[Bar], window: usize) -> Vec<Bar> {
    let n = bars.len();
    let mut out = bars.to_vec();
    for i in 0..n {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(n);
        let local_high = bars[lo..hi].iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let local_low = bars[lo..hi].iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        out[i].swing_high = bars[i].high >= local_high;
        out[i].swing_low = bars[i].low <= local_low;
    }
    out
}
