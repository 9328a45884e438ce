//! Indicator precompute — pure producers over a bar series, never mutated
//! in place (§2 "Indicator precompute" stage, §9 redesign note).

pub mod atr;
pub mod swings;

pub use atr::{atr as compute_atr, true_range, wilder_smooth, with_atr};
pub use swings::identify_swings;
