//! Batch pipeline tying costs, sizing and scoring together

use chrono::Utc;
use rayon::prelude::*;
use tracing::debug;
use uuid::Uuid;

use crate::arbitrage::scoring::ScoreWeights;
use crate::costs::CostModel;
use crate::sizing::{SizeOptimizer, SizingLimits};
use crate::types::{Opportunity, ScoredOpportunity};

/// Evaluates raw opportunities into ranked, sized, scored candidates.
///
/// One evaluator instance holds the whole pricing context, so every
/// opportunity in a batch is judged under the same costs and limits.
#[derive(Debug, Clone, Default)]
pub struct BatchEvaluator {
    pub model: CostModel,
    pub optimizer: SizeOptimizer,
    pub limits: SizingLimits,
    pub weights: ScoreWeights,
}

impl BatchEvaluator {
    /// Prices gas, searches for the best size and scores one opportunity.
    /// Degenerate inputs come back as a zero-scored no-trade entry rather
    /// than an error.
    pub fn evaluate(&self, opportunity: &Opportunity) -> ScoredOpportunity {
        let gas_usd = self.model.gas_cost_usd_with_limit(opportunity.gas_limit);
        let inclusion_seconds = self.model.inclusion_seconds();

        let sizing = self.optimizer.solve(
            opportunity.reserve_in,
            opportunity.reserve_out,
            opportunity.pool_fee_bps,
            opportunity.output_token_usd_price,
            &self.limits,
            |_dx, notional_usd| {
                self.model
                    .expected_net_usd(opportunity.edge_bps, notional_usd, gas_usd)
            },
        );
        if sizing.chosen_dx == 0.0 {
            debug!(
                pair = %opportunity.pair,
                edge_bps = opportunity.edge_bps,
                "no profitable size found"
            );
        }

        ScoredOpportunity {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            score: self
                .weights
                .score(sizing.net_usd, gas_usd, inclusion_seconds),
            opportunity: opportunity.clone(),
            sizing,
            gas_usd,
            inclusion_seconds,
        }
    }

    /// Evaluates a batch in parallel and returns it sorted by score,
    /// best first.
    pub fn evaluate_batch(&self, opportunities: &[Opportunity]) -> Vec<ScoredOpportunity> {
        let mut scored: Vec<ScoredOpportunity> = opportunities
            .par_iter()
            .map(|opportunity| self.evaluate(opportunity))
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }
}
