//! Constant-product arbitrage sizing and evaluation engine
//!
//! Takes pre-fetched pool snapshots, prices execution costs, searches for
//! the most profitable input size per opportunity, ranks batches under a
//! shared gas budget, and replays recorded opportunity tables for parameter
//! calibration.

pub mod config;
pub mod types;
pub mod errors;
pub mod amm;
pub mod costs;
pub mod sizing;
pub mod arbitrage;
pub mod backtest;
pub mod utils;
pub mod storage;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{EngineError, EngineResult};
pub use types::*;
