//! Historical replay, Monte Carlo sensitivity and parameter calibration

pub mod calibration;
pub mod engine;
pub mod monte_carlo;

pub use calibration::{CalibrationProblem, Objective};
pub use engine::run_backtest;
pub use monte_carlo::{run_monte_carlo, MonteCarloConfig, SweepGrid, SweepParameter};
