//! `PatternConfig` — the single immutable configuration struct consumed at
//! pipeline construction (§6). Deserializable from TOML via `serde`, matching
//! the teacher's `toml`-backed config loading.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpulseDetectionConfig {
    pub min_candles: usize,
    pub length_span: usize,
    pub min_atr_multiplier: f64,
    pub min_body_ratio: f64,
    pub max_internal_retracement: f64,
}

impl Default for ImpulseDetectionConfig {
    fn default() -> Self {
        Self {
            min_candles: 4,
            length_span: 10,
            min_atr_multiplier: 1.0,
            min_body_ratio: 0.5,
            max_internal_retracement: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PullbackDetectionConfig {
    pub max_duration_candles: usize,
    pub fib_range: FibRange,
    pub require_slowdown: bool,
}

impl Default for PullbackDetectionConfig {
    fn default() -> Self {
        Self {
            max_duration_candles: 10,
            fib_range: FibRange { min: 0.382, max: 0.786 },
            require_slowdown: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureRequirementsConfig {
    pub confirmation_scan_bars: usize,
}

impl Default for StructureRequirementsConfig {
    fn default() -> Self {
        Self {
            confirmation_scan_bars: 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopLossConfig {
    pub buffer_atr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskManagementConfig {
    pub max_bars_in_trade: usize,
    pub stop_loss: StopLossConfig,
    pub label_target_rr: f64,
    pub sim_rr_target: f64,
    pub fib_extension: f64,
}

impl Default for RiskManagementConfig {
    fn default() -> Self {
        Self {
            max_bars_in_trade: 20,
            stop_loss: StopLossConfig { buffer_atr: 0.5 },
            label_target_rr: 1.5,
            sim_rr_target: 2.5,
            fib_extension: 0.272,
        }
    }
}

/// Single immutable configuration struct, consumed at pipeline construction
/// and never mutated afterward (§5 "Configuration struct is read-only").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PatternConfig {
    pub impulse_detection: ImpulseDetectionConfig,
    pub pullback_detection: PullbackDetectionConfig,
    pub structure_requirements: StructureRequirementsConfig,
    pub risk_management: RiskManagementConfig,
}

/// §7 `ConfigInvalid` — fatal at construction, never raised mid-pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("pullback_detection.fib_range.min ({min}) must be < fib_range.max ({max})")]
    InvalidFibRange { min: f64, max: f64 },

    #[error("{field} must be positive, got {value}")]
    NonPositiveLength { field: &'static str, value: i64 },

    #[error("{field} must be positive, got {value}")]
    NonPositiveThreshold { field: &'static str, value: f64 },

    #[error("failed to parse config: {0}")]
    ParseError(String),
}

impl PatternConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: PatternConfig = toml::from_str(s).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    /// Validate invariants that must hold before the pipeline can be built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fib = &self.pullback_detection.fib_range;
        if fib.min >= fib.max {
            return Err(ConfigError::InvalidFibRange { min: fib.min, max: fib.max });
        }

        macro_rules! check_positive_len {
            ($value:expr, $name:literal) => {
                if ($value as i64) <= 0 {
                    return Err(ConfigError::NonPositiveLength {
                        field: $name,
                        value: $value as i64,
                    });
                }
            };
        }
        check_positive_len!(self.impulse_detection.min_candles, "impulse_detection.min_candles");
        check_positive_len!(
            self.pullback_detection.max_duration_candles,
            "pullback_detection.max_duration_candles"
        );
        check_positive_len!(
            self.structure_requirements.confirmation_scan_bars,
            "structure_requirements.confirmation_scan_bars"
        );
        check_positive_len!(self.risk_management.max_bars_in_trade, "risk_management.max_bars_in_trade");

        macro_rules! check_positive_val {
            ($value:expr, $name:literal) => {
                if $value <= 0.0 {
                    return Err(ConfigError::NonPositiveThreshold {
                        field: $name,
                        value: $value,
                    });
                }
            };
        }
        check_positive_val!(
            self.impulse_detection.min_atr_multiplier,
            "impulse_detection.min_atr_multiplier"
        );
        check_positive_val!(self.impulse_detection.min_body_ratio, "impulse_detection.min_body_ratio");
        check_positive_val!(self.risk_management.label_target_rr, "risk_management.label_target_rr");
        check_positive_val!(self.risk_management.sim_rr_target, "risk_management.sim_rr_target");

        Ok(())
    }
}
