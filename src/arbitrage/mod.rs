//! Opportunity scoring, ranking and budget-constrained selection

pub mod evaluator;
pub mod scoring;
pub mod selector;

pub use evaluator::BatchEvaluator;
pub use scoring::ScoreWeights;
pub use selector::select_within_gas_budget;
