//! Grid-plus-jitter sensitivity analysis over replay parameters
//!
//! Each run draws one value from a fixed parameter grid, writes it into a
//! private copy of the parameter set and replays noisy copies of the record
//! table. Runs are seeded individually, so results are reproducible under
//! any thread scheduling and the base parameters are never touched.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::backtest::engine::run_backtest;
use crate::types::{BacktestMetrics, BacktestParams, BacktestRecord, MonteCarloSummary};
use crate::utils::{mean, sample_std};

/// Replay parameter swept across Monte Carlo runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    GasMultiplier,
    SlippageBps,
    FeesBps,
    MinSpreadBps,
    FailProb,
}

impl SweepParameter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::GasMultiplier => "gas_multiplier",
            Self::SlippageBps => "slippage_bps",
            Self::FeesBps => "fees_bps",
            Self::MinSpreadBps => "min_spread_bps",
            Self::FailProb => "fail_prob",
        }
    }
}

/// Fixed candidate values for one swept parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepGrid {
    pub parameter: SweepParameter,
    pub values: Vec<f64>,
}

impl SweepGrid {
    pub fn new(parameter: SweepParameter, values: Vec<f64>) -> Self {
        Self { parameter, values }
    }

    /// Gas multipliers around the recorded baseline.
    pub fn gas_multiplier() -> Self {
        Self::new(
            SweepParameter::GasMultiplier,
            vec![0.5, 0.75, 1.0, 1.25, 1.5, 2.0],
        )
    }

    /// Slippage assumptions from 5 to 50 bps in 5 bps steps.
    pub fn slippage_bps() -> Self {
        Self::new(
            SweepParameter::SlippageBps,
            vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0],
        )
    }

    /// Inclusion failure probabilities up to 20%.
    pub fn fail_prob() -> Self {
        Self::new(SweepParameter::FailProb, vec![0.0, 0.05, 0.1, 0.15, 0.2])
    }
}

/// Run count, noise widths and base seed for one sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub runs: usize,
    /// Multiplicative half-width of the per-row edge noise. Zero disables it.
    pub edge_jitter: f64,
    /// Multiplicative half-width of the per-row notional noise. Zero disables it.
    pub notional_jitter: f64,
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            runs: 1000,
            edge_jitter: 0.10,
            notional_jitter: 0.20,
            seed: 42,
        }
    }
}

/// Sweeps one parameter across jittered replays and aggregates run nets.
pub fn run_monte_carlo(
    records: &[BacktestRecord],
    base_params: &BacktestParams,
    grid: &SweepGrid,
    config: &MonteCarloConfig,
) -> MonteCarloSummary {
    if config.runs == 0 || grid.values.is_empty() {
        return MonteCarloSummary::zero(grid.parameter.label());
    }
    if grid.parameter == SweepParameter::FailProb && base_params.extended.is_none() {
        warn!("fail probability sweep without extended costs; runs replay the base parameters");
    }

    let results: Vec<BacktestMetrics> = (0..config.runs)
        .into_par_iter()
        .map(|run| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(run as u64));
            let value = grid.values[rng.random_range(0..grid.values.len())];
            let params = apply_sweep(base_params, grid.parameter, value);
            let jittered = jitter_records(records, config, &mut rng);
            run_backtest(&jittered, &params)
        })
        .collect();

    let nets: Vec<f64> = results.iter().map(|m| m.total_net_usd).collect();
    let drawdowns: Vec<f64> = results.iter().map(|m| m.max_drawdown_usd.abs()).collect();
    MonteCarloSummary {
        runs: results.len(),
        swept: grid.parameter.label().to_string(),
        mean_net_usd: mean(&nets),
        std_net_usd: sample_std(&nets),
        mean_drawdown_usd: mean(&drawdowns),
        worst_run_net_usd: nets.iter().copied().fold(f64::INFINITY, f64::min),
    }
}

/// Writes the drawn value into a private copy of the parameter set.
fn apply_sweep(base: &BacktestParams, parameter: SweepParameter, value: f64) -> BacktestParams {
    let mut params = base.clone();
    match parameter {
        SweepParameter::GasMultiplier => params.gas_multiplier = value,
        SweepParameter::SlippageBps => params.slippage_bps = value,
        SweepParameter::FeesBps => params.fees_bps = value,
        SweepParameter::MinSpreadBps => params.min_spread_bps = value,
        SweepParameter::FailProb => {
            if let Some(extended) = params.extended.as_mut() {
                extended.fail_prob = value;
            }
        }
    }
    params
}

fn jitter_multiplier(rng: &mut StdRng, jitter: f64) -> f64 {
    if jitter <= 0.0 {
        return 1.0;
    }
    rng.random_range(1.0 - jitter..1.0 + jitter)
}

/// Noisy copy of the record table. Edge noise moves both the spread and the
/// gross it produced; notional noise moves the fill size and rescales gross
/// with it.
fn jitter_records(
    records: &[BacktestRecord],
    config: &MonteCarloConfig,
    rng: &mut StdRng,
) -> Vec<BacktestRecord> {
    records
        .iter()
        .map(|record| {
            let edge_mult = jitter_multiplier(rng, config.edge_jitter);
            let notional_mult = jitter_multiplier(rng, config.notional_jitter);
            let mut row = record.clone();
            row.spread_bps *= edge_mult;
            row.notional_usd *= notional_mult;
            row.gross_usd *= edge_mult * notional_mult;
            row
        })
        .collect()
}
