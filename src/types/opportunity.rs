//! Opportunity and sizing result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One detected price discrepancy on a constant-product venue. Produced once
/// per detection cycle by the ingestion side and consumed by exactly one
/// evaluation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub pair: String,
    pub route: String,
    /// Pool reserve on the input side, token units.
    pub reserve_in: f64,
    /// Pool reserve on the output side, token units.
    pub reserve_out: f64,
    pub pool_fee_bps: f64,
    /// USD price of one output token.
    pub output_token_usd_price: f64,
    /// Estimated price edge against the reference venue.
    pub edge_bps: f64,
    /// Per-route gas estimate; the configured default applies when absent.
    #[serde(default)]
    pub gas_limit: Option<u64>,
}

impl Opportunity {
    /// Sizing requires live reserves on both sides and a positive output price.
    pub fn has_valid_route(&self) -> bool {
        self.reserve_in > 0.0 && self.reserve_out > 0.0 && self.output_token_usd_price > 0.0
    }
}

/// Outcome of the bounded size search for one opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    /// Input amount to trade, token units. 0 means "do not trade".
    pub chosen_dx: f64,
    pub net_usd: f64,
    pub slip_bps: f64,
    pub notional_usd: f64,
}

impl SizingResult {
    /// Safe result for degenerate inputs and failed searches.
    pub fn no_trade() -> Self {
        Self {
            chosen_dx: 0.0,
            net_usd: 0.0,
            slip_bps: 0.0,
            notional_usd: 0.0,
        }
    }

    /// Mirrors the executor's accept gate: positive size, net above the
    /// profit floor, slippage at or below the ceiling.
    pub fn is_viable(&self, min_net_usd: f64, max_slip_bps: f64) -> bool {
        self.chosen_dx > 0.0 && self.net_usd >= min_net_usd && self.slip_bps <= max_slip_bps
    }
}

/// An evaluated opportunity ready for ranking and selection.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredOpportunity {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub opportunity: Opportunity,
    pub sizing: SizingResult,
    /// Gas cost used for this row, including any per-route override.
    pub gas_usd: f64,
    pub inclusion_seconds: f64,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_validity() {
        let mut opp = Opportunity {
            pair: "WETH/USDC".to_string(),
            route: "uniswap_v2".to_string(),
            reserve_in: 1_000_000.0,
            reserve_out: 1_000_000.0,
            pool_fee_bps: 30.0,
            output_token_usd_price: 1.0,
            edge_bps: 20.0,
            gas_limit: None,
        };
        assert!(opp.has_valid_route());

        opp.reserve_out = 0.0;
        assert!(!opp.has_valid_route());

        opp.reserve_out = 1_000_000.0;
        opp.output_token_usd_price = -1.0;
        assert!(!opp.has_valid_route());
    }

    #[test]
    fn test_viability_gate() {
        let sizing = SizingResult {
            chosen_dx: 1_500.0,
            net_usd: 12.5,
            slip_bps: 35.0,
            notional_usd: 1_480.0,
        };
        assert!(sizing.is_viable(1.0, 50.0));
        assert!(!sizing.is_viable(20.0, 50.0));
        assert!(!sizing.is_viable(1.0, 30.0));
        assert!(!SizingResult::no_trade().is_viable(0.0, 100.0));
    }
}
