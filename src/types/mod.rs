//! Core data types and structures

pub mod backtest;
pub mod opportunity;
pub mod params;

pub use backtest::*;
pub use opportunity::*;
pub use params::*;
