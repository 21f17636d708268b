//! Greedy selection of scored opportunities under a shared gas budget

use tracing::debug;

use crate::types::ScoredOpportunity;

/// Picks opportunities in descending score order while their summed gas cost
/// fits the budget. An entry that does not fit is skipped and the scan keeps
/// going, so a cheap lower-ranked entry can still use leftover budget.
pub fn select_within_gas_budget(
    scored: &[ScoredOpportunity],
    gas_budget_usd: f64,
) -> Vec<ScoredOpportunity> {
    let mut ranked: Vec<&ScoredOpportunity> = scored.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut selected = Vec::new();
    let mut remaining = gas_budget_usd;
    for entry in ranked {
        if entry.gas_usd <= remaining {
            remaining -= entry.gas_usd;
            selected.push(entry.clone());
        } else {
            debug!(
                pair = %entry.opportunity.pair,
                gas_usd = entry.gas_usd,
                remaining_usd = remaining,
                "skipping opportunity over gas budget"
            );
        }
    }
    selected
}
