//! Bar — the fundamental OHLCV observation the whole pipeline is built on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One OHLCV observation, chronologically indexed into a bar array.
///
/// `atr` is `NaN` for bars inside the indicator warmup window (the first
/// `period - 1` bars) — callers must treat a `NaN` ATR as "ineligible as an
/// impulse start", never as zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub atr: f64,
    /// Advisory only — never consulted by the recognizers (§6 input contract).
    pub swing_high: bool,
    /// Advisory only — never consulted by the recognizers (§6 input contract).
    pub swing_low: bool,
}

impl Bar {
    /// True if open/high/low/close/volume are finite and internally consistent
    /// (`low <= open/close <= high`, `volume >= 0`). Does not consider `atr`.
    pub fn is_sane(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
            && self.volume >= 0.0
            && self.low <= self.open
            && self.low <= self.close
            && self.high >= self.open
            && self.high >= self.close
    }

    /// Candle body magnitude `|close - open|`.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Bar range `high - low`.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn has_atr(&self) -> bool {
        self.atr.is_finite()
    }
}

/// Errors surfaced while validating a caller-supplied bar series (§7, `InputValidation`).
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("bar {index}: timestamp does not strictly increase over bar {prev}")]
    NotSorted { prev: usize, index: usize },

    #[error("bar {index}: duplicate timestamp with bar {prev}")]
    DuplicateTimestamp { prev: usize, index: usize },

    #[error("bar {index}: negative volume ({volume})")]
    NegativeVolume { index: usize, volume: f64 },

    #[error("bar {index}: low ({low}) greater than high ({high})")]
    InvertedRange { index: usize, low: f64, high: f64 },

    #[error("bar {index}: open/close ({value}) outside [low, high] = [{low}, {high}]")]
    BodyOutsideRange {
        index: usize,
        value: f64,
        low: f64,
        high: f64,
    },

    #[error("bar {index}: non-finite field")]
    NonFinite { index: usize },
}

/// Validate a bar series per §7 `InputValidation`: ascending, deduplicated
/// timestamps and sane OHLCV. Fatal for the whole symbol on the first failure.
pub fn validate_bars(bars: &[Bar]) -> Result<(), InputError> {
    for (i, bar) in bars.iter().enumerate() {
        if !bar.open.is_finite() || !bar.high.is_finite() || !bar.low.is_finite() || !bar.close.is_finite() {
            return Err(InputError::NonFinite { index: i });
        }
        if bar.volume < 0.0 {
            return Err(InputError::NegativeVolume {
                index: i,
                volume: bar.volume,
            });
        }
        if bar.low > bar.high {
            return Err(InputError::InvertedRange {
                index: i,
                low: bar.low,
                high: bar.high,
            });
        }
        if bar.open < bar.low || bar.open > bar.high {
            return Err(InputError::BodyOutsideRange {
                index: i,
                value: bar.open,
                low: bar.low,
                high: bar.high,
            });
        }
        if bar.close < bar.low || bar.close > bar.high {
            return Err(InputError::BodyOutsideRange {
                index: i,
                value: bar.close,
                low: bar.low,
                high: bar.high,
            });
        }
        if i > 0 {
            let prev = &bars[i - 1];
            if bar.timestamp == prev.timestamp {
                return Err(InputError::DuplicateTimestamp { prev: i - 1, index: i });
            }
            if bar.timestamp < prev.timestamp {
                return Err(InputError::NotSorted { prev: i - 1, index: i });
            }
        }
    }
    Ok(())
}
