//! Custom error types for the engine
//!
//! Degenerate numeric inputs never raise: sizing and backtest paths return
//! zero-valued "do not trade" results instead. Errors here are reserved for
//! configuration problems, which must surface before any evaluation runs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to parse configuration value {name}={value}")]
    ConfigParse {
        name: &'static str,
        value: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid configuration: {name} - {reason}")]
    InvalidConfig {
        name: &'static str,
        reason: String,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
