//! Metrics aggregator (§4.8) — reduces a sequence of trade R-multiples to
//! summary statistics. Empty input produces an empty (zeroed) result, never
//! a division.

use crate::domain::TradeRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_trades: usize,
    pub win_rate: f64,
    pub expectancy: f64,
    pub profit_factor: f64,
    pub max_drawdown: f64,
    pub sharpe: f64,
    pub net_profit_r: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            total_trades: 0,
            win_rate: 0.0,
            expectancy: 0.0,
            profit_factor: 0.0,
            max_drawdown: 0.0,
            sharpe: 0.0,
            net_profit_r: 0.0,
        }
    }
}

impl Metrics {
    /// Aggregate metrics from a trade sequence's R-multiples (§4.8). Trade
    /// order is the equity-curve order: callers must pass trades already
    /// sorted the way they want drawdown computed over. Patterns with no
    /// trade (`None`, see `PatternDetectionSummary`) are skipped rather than
    /// counted as zero-R trades.
    pub fn from_trades(trades: &[Option<TradeRecord>]) -> Self {
        let r: Vec<f64> = trades.iter().flatten().map(|t| t.r_multiple).collect();
        Self::from_r_multiples(&r)
    }

    pub fn from_r_multiples(r: &[f64]) -> Self {
        let m = r.len();
        if m == 0 {
            return Self::default();
        }

        let net_profit_r: f64 = r.iter().sum();
        let expectancy = net_profit_r / m as f64;
        let wins = r.iter().filter(|&&x| x > 0.0).count();
        let win_rate = wins as f64 / m as f64;

        let gains: f64 = r.iter().filter(|&&x| x > 0.0).sum();
        let losses: f64 = r.iter().filter(|&&x| x < 0.0).map(|x| x.abs()).sum();
        let profit_factor = if losses == 0.0 { f64::INFINITY } else { gains / losses };

        let mut equity = 0.0;
        let mut running_max = f64::NEG_INFINITY;
        let mut max_drawdown = 0.0_f64;
        for &x in r {
            equity += x;
            running_max = running_max.max(equity);
            max_drawdown = max_drawdown.min(equity - running_max);
        }

        let variance = r.iter().map(|x| (x - expectancy).powi(2)).sum::<f64>() / m as f64;
        let stddev = variance.sqrt();
        let sharpe = if stddev == 0.0 { 0.0 } else { expectancy / stddev };

        Self {
            total_trades: m,
            win_rate,
            expectancy,
            profit_factor,
            max_drawdown,
            sharpe,
            net_profit_r,
        }
    }

    /// The equity curve `Σ_{j≤k} r[j]`, exposed separately since callers
    /// commonly want to plot it even though `Metrics` only retains the
    /// drawdown it produces.
    pub fn equity_curve(r: &[f64]) -> Vec<f64> {
        let mut equity = 0.0;
        r.iter()
            .map(|x| {
                equity += x;
                equity
            })
            .collect()
    }
}
