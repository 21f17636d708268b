//! Constant-product AMM math

pub mod xyk;

pub use xyk::*;
