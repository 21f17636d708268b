//! Bounded trade-size search over the pool curve

pub mod optimizer;

pub use optimizer::{SizeOptimizer, SizingLimits};
