//! Trade cost modeling

pub mod gas_curve;
pub mod model;

pub use gas_curve::*;
pub use model::*;
