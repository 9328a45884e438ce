//! Impulse / Fibonacci-pullback / structure-break pattern engine.
//!
//! This crate contains the core detection and simulation pipeline:
//! - Domain types (bars, impulses, pullbacks, structures, patterns, trades)
//! - Indicator precompute (ATR, swing markers)
//! - The impulse → pullback → structure recognizer chain
//! - Feature extraction, labeling, and R-multiple trade simulation
//! - Metrics aggregation over trade sequences
//!
//! Callers build a [`config::PatternConfig`], construct a [`pipeline::Pipeline`],
//! and run it over a bar series. Exchange connectivity, persistence, the ML
//! model itself, and the CLI/reporting surface are external collaborators
//! this crate does not implement.

pub mod config;
pub mod domain;
pub mod engine;
pub mod features;
pub mod indicators;
pub mod labeler;
pub mod metrics;
pub mod pipeline;
pub mod simulator;

pub use config::{ConfigError, PatternConfig};
pub use domain::{Bar, Direction, FeatureVector, InputError, Label, Pattern, PatternDetectionSummary, TradeRecord};
pub use metrics::Metrics;
pub use pipeline::Pipeline;
