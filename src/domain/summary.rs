//! PatternDetectionSummary — the bundle a caller wants out of a single run,
//! instead of re-zipping four parallel vectors by hand (as
//! `original_source/main.py` does inline).

use super::{FeatureVector, Label, Pattern, TradeRecord};
use crate::metrics::Metrics;
use serde::{Deserialize, Serialize};

/// `patterns`, `features`, `labels`, and `trades` are always the same
/// length and positionally aligned (§5 "downstream feature/label/trade rows
/// maintain positional correspondence with the pattern array"; §6 "ordered
/// sequence of feature vectors and labels of identical length"). `labels[i]`
/// / `trades[i]` is `None` when pattern `i`'s entry sits too close to the end
/// of the bar series for the labeler/simulator to run even one scan bar —
/// that pattern keeps its row instead of shifting every later row left.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternDetectionSummary {
    pub patterns: Vec<Pattern>,
    pub features: Vec<FeatureVector>,
    pub labels: Vec<Option<Label>>,
    pub trades: Vec<Option<TradeRecord>>,
    pub metrics: Metrics,
}

impl PatternDetectionSummary {
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Serialize the summary to JSON, the exchange format the CLI/reporting
    /// surface (an external collaborator per §1) consumes.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_round_trips_through_json() {
        let summary = PatternDetectionSummary::default();
        let json = summary.to_json().unwrap();
        let parsed: PatternDetectionSummary = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_empty());
    }
}
