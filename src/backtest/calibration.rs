//! Parameter-set scoring for external calibration routines
//!
//! The problem exposes a pure parameters-to-score callback, so any bounded
//! or gradient-free optimizer can drive it. The built-in grid search covers
//! the common case of a small enumerated candidate set.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backtest::engine::run_backtest;
use crate::types::{BacktestMetrics, BacktestParams, BacktestRecord};

/// Scalar objective extracted from replay metrics, higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    TotalNet,
    WinRate,
    SharpeProxy,
    AvgProfitPerGas,
    /// Net discounted by realized drawdown, `net / (1 + |drawdown|)`.
    NetOverDrawdown,
}

impl Objective {
    pub fn score(&self, metrics: &BacktestMetrics) -> f64 {
        match self {
            Self::TotalNet => metrics.total_net_usd,
            Self::WinRate => metrics.win_rate,
            Self::SharpeProxy => metrics.sharpe_proxy,
            Self::AvgProfitPerGas => metrics.avg_profit_per_gas,
            Self::NetOverDrawdown => {
                metrics.total_net_usd / (1.0 + metrics.max_drawdown_usd.abs())
            }
        }
    }
}

/// A record table plus the objective to maximize over it.
#[derive(Debug, Clone)]
pub struct CalibrationProblem<'a> {
    pub records: &'a [BacktestRecord],
    pub objective: Objective,
}

impl<'a> CalibrationProblem<'a> {
    pub fn new(records: &'a [BacktestRecord], objective: Objective) -> Self {
        Self { records, objective }
    }

    /// Scores one candidate parameter set.
    pub fn evaluate(&self, params: &BacktestParams) -> (f64, BacktestMetrics) {
        let metrics = run_backtest(self.records, params);
        (self.objective.score(&metrics), metrics)
    }

    /// Evaluates every candidate and returns the best one with its metrics
    /// and score. Ties keep the earliest candidate. `None` for an empty
    /// candidate list.
    pub fn grid_search(
        &self,
        candidates: &[BacktestParams],
    ) -> Option<(BacktestParams, BacktestMetrics, f64)> {
        let evaluated: Vec<(f64, BacktestMetrics)> = candidates
            .par_iter()
            .map(|params| self.evaluate(params))
            .collect();

        let mut best: Option<(usize, f64)> = None;
        for (idx, (score, _)) in evaluated.iter().enumerate() {
            let better = match best {
                None => true,
                Some((_, best_score)) => score.total_cmp(&best_score).is_gt(),
            };
            if better {
                best = Some((idx, *score));
            }
        }

        best.map(|(idx, score)| {
            let (_, metrics) = evaluated[idx].clone();
            info!(
                candidate = idx,
                score,
                count = metrics.count,
                "grid search picked candidate"
            );
            (candidates[idx].clone(), metrics, score)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Utc;

    fn records() -> Vec<BacktestRecord> {
        (0..6)
            .map(|i| BacktestRecord {
                ts: Utc::now(),
                spread_bps: 45.0,
                gross_usd: 80.0 + 5.0 * i as f64,
                gas_usd: 3.0,
                notional_usd: 9_000.0,
                liquidity_usd: 60_000.0,
            })
            .collect()
    }

    #[test]
    fn test_objectives_read_their_metric() {
        let metrics = BacktestMetrics {
            total_gross_usd: 40.0,
            total_net_usd: 10.0,
            win_rate: 0.5,
            avg_profit_per_gas: 3.0,
            max_drawdown_usd: -4.0,
            sharpe_proxy: 1.2,
            count: 8,
        };
        assert_eq!(Objective::TotalNet.score(&metrics), 10.0);
        assert_eq!(Objective::WinRate.score(&metrics), 0.5);
        assert_eq!(Objective::SharpeProxy.score(&metrics), 1.2);
        assert_eq!(Objective::AvgProfitPerGas.score(&metrics), 3.0);
        assert_relative_eq!(
            Objective::NetOverDrawdown.score(&metrics),
            2.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_evaluate_scores_the_replay() {
        let records = records();
        let problem = CalibrationProblem::new(&records, Objective::TotalNet);
        let (score, metrics) = problem.evaluate(&BacktestParams::default());
        assert_eq!(score, metrics.total_net_usd);
        assert_eq!(metrics.count, 6);
    }

    #[test]
    fn test_grid_search_prefers_cheaper_gas() {
        let records = records();
        let problem = CalibrationProblem::new(&records, Objective::TotalNet);
        let candidates = vec![
            BacktestParams {
                gas_multiplier: 3.0,
                ..BacktestParams::default()
            },
            BacktestParams {
                gas_multiplier: 1.0,
                ..BacktestParams::default()
            },
            BacktestParams {
                gas_multiplier: 2.0,
                ..BacktestParams::default()
            },
        ];

        let (best, metrics, score) = problem
            .grid_search(&candidates)
            .expect("candidates were provided");
        assert_eq!(best.gas_multiplier, 1.0);
        assert_eq!(score, metrics.total_net_usd);
        assert!(score > 0.0);
    }

    #[test]
    fn test_grid_search_empty_candidates() {
        let records = records();
        let problem = CalibrationProblem::new(&records, Objective::SharpeProxy);
        assert!(problem.grid_search(&[]).is_none());
    }
}
