//! Pipeline — ties the detection engine, feature extractor, labeler,
//! simulator, and metrics aggregator together into the single entry point an
//! external caller (offline trainer, live scanner) drives (§6).

use rayon::prelude::*;

use crate::config::{ConfigError, PatternConfig};
use crate::domain::{validate_bars, Bar, FeatureVector, InputError, Label, Pattern, PatternDetectionSummary, TradeRecord};
use crate::engine::assemble_patterns;
use crate::features::extract_features;
use crate::labeler::label_pattern;
use crate::metrics::Metrics;
use crate::simulator::simulate_trade;

/// The minimum bar count below which detection is skipped entirely rather
/// than attempted against a window too short to ever produce a pattern
/// (§7 `InsufficientData` — "zero patterns, not an error").
fn minimum_bars_required(config: &PatternConfig) -> usize {
    config.impulse_detection.min_candles
        + config.pullback_detection.max_duration_candles
        + config.structure_requirements.confirmation_scan_bars
        + config.risk_management.max_bars_in_trade
}

/// Immutable pipeline: a validated configuration plus a `parallel` switch for
/// the per-pattern feature/label/simulation maps (§5).
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    config: PatternConfig,
    parallel: bool,
}

impl Pipeline {
    /// Build a pipeline, validating `config` first (§7 `ConfigInvalid` is
    /// fatal at construction, never mid-run). Configs loaded via
    /// [`PatternConfig::from_toml_str`]/[`PatternConfig::from_toml_file`] are
    /// already validated, but construction here re-validates regardless so
    /// there is exactly one place a caller can get a bad config past — never
    /// silently, as a config built by hand in code would otherwise do.
    pub fn new(config: PatternConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, parallel: false })
    }

    /// Enable `rayon`-backed parallel feature/label/simulation maps. Impulse
    /// detection itself stays sequential (it is a single scan over `bars`);
    /// this only affects the per-pattern stages downstream of detection.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Run the full pipeline over one symbol's bar series (§2, §6).
    pub fn run(&self, bars: &[Bar]) -> Result<PatternDetectionSummary, InputError> {
        validate_bars(bars)?;

        if bars.len() < minimum_bars_required(&self.config) {
            tracing::debug!(
                bars = bars.len(),
                required = minimum_bars_required(&self.config),
                "fewer bars than the full min_candles+max_duration+confirmation+max_bars_in_trade span; \
                 detection will run but is unlikely to complete any pattern"
            );
        }

        let patterns = assemble_patterns(bars, &self.config);
        tracing::debug!(patterns = patterns.len(), "pattern assembly complete");

        let (features, labels, trades) = if self.parallel {
            self.run_downstream_parallel(bars, &patterns)
        } else {
            self.run_downstream_sequential(bars, &patterns)
        };

        let metrics = Metrics::from_trades(&trades);
        Ok(PatternDetectionSummary {
            patterns,
            features,
            labels,
            trades,
            metrics,
        })
    }

    /// `features`, `labels`, and `trades` all come out the same length as
    /// `patterns` and positionally aligned with it (see
    /// `PatternDetectionSummary`'s doc comment) — `labels`/`trades` carry
    /// `None` rather than dropping a row when a pattern's entry is too close
    /// to the end of `bars` to run the forward scan.
    fn run_downstream_sequential(
        &self,
        bars: &[Bar],
        patterns: &[Pattern],
    ) -> (Vec<FeatureVector>, Vec<Option<Label>>, Vec<Option<TradeRecord>>) {
        let risk = &self.config.risk_management;
        let mut features = Vec::with_capacity(patterns.len());
        let mut labels = Vec::with_capacity(patterns.len());
        let mut trades = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            features.push(extract_features(bars, pattern));
            labels.push(label_pattern(bars, pattern, risk));
            trades.push(simulate_trade(bars, pattern, risk));
        }
        (features, labels, trades)
    }

    fn run_downstream_parallel(
        &self,
        bars: &[Bar],
        patterns: &[Pattern],
    ) -> (Vec<FeatureVector>, Vec<Option<Label>>, Vec<Option<TradeRecord>>) {
        let risk = &self.config.risk_management;

        // Each map collects into a `Vec` in input order (§5 "collecting into
        // a Vec indexed by position, never by a channel"), preserving
        // positional correspondence with `patterns` regardless of which
        // worker finished first. None of these filter: a pattern with no
        // label/trade keeps its slot as `None`.
        let features: Vec<FeatureVector> = patterns.par_iter().map(|p| extract_features(bars, p)).collect();
        let labels: Vec<Option<Label>> = patterns.par_iter().map(|p| label_pattern(bars, p, risk)).collect();
        let trades: Vec<Option<TradeRecord>> = patterns.par_iter().map(|p| simulate_trade(bars, p, risk)).collect();
        (features, labels, trades)
    }
}
