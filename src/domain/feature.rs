//! FeatureVector — fixed-order numeric descriptors per pattern (§4.5).

use serde::{Deserialize, Serialize};

/// Field order is part of the contract: this is the order a model was
/// trained on, and the order `FeatureVector::as_array` emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub impulse_range_atr: f64,
    pub impulse_duration: f64,
    pub pullback_depth: f64,
    pub pullback_duration: f64,
    pub volatility_contraction: f64,
    pub extremum_wick_ratio: f64,
    pub structure_break_strength: f64,
    pub volume_ratio: f64,
    pub is_bullish: f64,
}

impl FeatureVector {
    pub const FIELD_NAMES: [&'static str; 9] = [
        "impulse_range_atr",
        "impulse_duration",
        "pullback_depth",
        "pullback_duration",
        "volatility_contraction",
        "extremum_wick_ratio",
        "structure_break_strength",
        "volume_ratio",
        "is_bullish",
    ];

    /// Fixed-order array, for handing to an opaque classifier as a feature row.
    pub fn as_array(&self) -> [f64; 9] {
        [
            self.impulse_range_atr,
            self.impulse_duration,
            self.pullback_depth,
            self.pullback_duration,
            self.volatility_contraction,
            self.extremum_wick_ratio,
            self.structure_break_strength,
            self.volume_ratio,
            self.is_bullish,
        ]
    }

    pub fn all_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }
}
