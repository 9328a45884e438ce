//! Pattern assembler (§4.4) — composes (impulse, pullback, structure) tuples
//! and attaches the coarse forward-continuation flag.

use super::impulse_recognizer::detect_impulses;
use super::pullback_measurer::measure_pullback;
use super::structure_validator::validate_structure;
use crate::config::PatternConfig;
use crate::domain::{Bar, Direction, Impulse, Pattern, Structure};

const SUCCESS_HORIZON_BARS: usize = 20;
const SUCCESS_CONTINUATION_FRACTION: f64 = 0.5;

/// Run the impulse → pullback → structure chain over the whole bar series
/// and emit one `Pattern` per impulse that clears all three stages.
///
/// Patterns are emitted in impulse-start order (§4.4): overlapping impulses
/// are not deduplicated here (§9 open question 4 — left to the caller).
pub fn assemble_patterns(bars: &[Bar], config: &PatternConfig) -> Vec<Pattern> {
    let impulses = detect_impulses(bars, &config.impulse_detection);
    let mut patterns = Vec::new();

    for impulse in &impulses {
        let Some(pullback) = measure_pullback(bars, impulse, &config.pullback_detection) else {
            continue;
        };
        let Some(structure) = validate_structure(bars, impulse, &pullback, &config.structure_requirements) else {
            continue;
        };

        let success_flag = evaluate_coarse_success(bars, impulse, &structure);
        patterns.push(Pattern {
            impulse: *impulse,
            pullback,
            structure,
            success_flag,
            timestamp_of_impulse_start: bars[impulse.start_idx].timestamp,
        });
    }

    patterns
}

/// Coarse forward-look test (§3): continuation >= 0.5 * impulse.range within
/// 20 bars of entry. Distinct from the labeler's and simulator's outcomes.
fn evaluate_coarse_success(bars: &[Bar], impulse: &Impulse, structure: &Structure) -> bool {
    let n = bars.len();
    let entry_idx = structure.entry_idx;
    if entry_idx + 1 >= n {
        return false;
    }
    let end_idx = (entry_idx + SUCCESS_HORIZON_BARS).min(n - 1);
    let future = &bars[entry_idx + 1..=end_idx];
    if future.is_empty() {
        return false;
    }

    let threshold = SUCCESS_CONTINUATION_FRACTION * impulse.range;
    match impulse.direction {
        Direction::Bullish => {
            let max_future = future.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
            max_future > structure.entry_price + threshold
        }
        Direction::Bearish => {
            let min_future = future.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            min_future < structure.entry_price - threshold
        }
    }
}
