//! Canonical cost model shared by the sizing path and the backtest
//!
//! Every USD cost figure in the engine comes from here: gas, adverse
//! selection during the inclusion window, flash-loan overheads, and the
//! expected-value failure adjustment. Both the per-opportunity optimizer and
//! the vectorized replay call into the same formulas, so parameters
//! calibrated offline are achievable by the live sizing path.

use serde::{Deserialize, Serialize};

use crate::types::{FrictionParameters, GasParameters, LatencyParameters};
use crate::utils::{clamp_probability, BPS_SCALE};

const WEI_PER_GWEI: f64 = 1e9;
const WEI_PER_NATIVE: f64 = 1e18;

/// Floor applied to the inclusion window before the square root.
pub const MIN_INCLUSION_SECONDS: f64 = 1e-6;

/// Spot gas cost in USD for one transaction at the given unit budget,
/// clamped to the configured ceiling and floored at zero.
pub fn gas_cost_usd(gas: &GasParameters, gas_limit: u64) -> f64 {
    let fee_native =
        (gas.base_fee_gwei + gas.priority_tip_gwei) * WEI_PER_GWEI * gas_limit as f64
            / WEI_PER_NATIVE;
    (fee_native * gas.native_usd_price)
        .max(0.0)
        .min(gas.max_gas_usd_cap.max(0.0))
}

/// Bundled pricing assumptions for one evaluation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostModel {
    pub gas: GasParameters,
    pub latency: LatencyParameters,
    pub friction: FrictionParameters,
    /// Probability the submitted transaction reverts or is front-run.
    pub fail_prob: f64,
}

impl CostModel {
    /// Gas cost at the configured unit budget.
    pub fn gas_cost_usd(&self) -> f64 {
        gas_cost_usd(&self.gas, self.gas.gas_limit)
    }

    /// Gas cost honoring a per-opportunity unit override.
    pub fn gas_cost_usd_with_limit(&self, gas_limit: Option<u64>) -> f64 {
        gas_cost_usd(&self.gas, gas_limit.unwrap_or(self.gas.gas_limit))
    }

    /// Expected seconds between decision and on-chain inclusion.
    pub fn inclusion_seconds(&self) -> f64 {
        let seconds = self.latency.decision_delay_ms / 1_000.0
            + f64::from(self.latency.inclusion_blocks) * self.latency.seconds_per_block;
        seconds.max(MIN_INCLUSION_SECONDS)
    }

    /// Brownian-drift style penalty: k · sqrt(Δt) · beta · notional.
    pub fn adverse_selection_usd(&self, notional_usd: f64) -> f64 {
        self.latency.k_vol
            * self.inclusion_seconds().sqrt()
            * self.latency.notional_beta
            * notional_usd
    }

    /// Variable plus fixed flash-loan overheads in USD.
    pub fn flash_loan_cost_usd(&self, notional_usd: f64) -> f64 {
        (self.friction.flash_fee_bps + self.friction.referral_bps) / BPS_SCALE * notional_usd
            + self.friction.flash_fixed_usd
            + self.friction.executor_fee_usd
    }

    /// Expected value under execution failure: with probability `fail_prob`
    /// the trade loses its edge but still burns gas.
    pub fn apply_failure(net_usd: f64, gas_usd: f64, fail_prob: f64) -> f64 {
        let p = clamp_probability(fail_prob);
        (1.0 - p) * net_usd + p * (-gas_usd)
    }

    /// Core expected-net formula over explicit cost parts.
    pub fn expected_net_from_parts(
        edge_bps: f64,
        notional_usd: f64,
        total_fee_bps: f64,
        gas_usd: f64,
        adverse_usd: f64,
        extra_usd: f64,
        fail_prob: f64,
    ) -> f64 {
        let gross = edge_bps / BPS_SCALE * notional_usd;
        let after_fees = gross * (1.0 - total_fee_bps / BPS_SCALE) - extra_usd;
        let net = after_fees - gas_usd - adverse_usd;
        Self::apply_failure(net, gas_usd, fail_prob)
    }

    /// Expected net for a notional at the given edge, assembling fee, latency
    /// and flash-loan terms from the bundled parameters. `gas_usd` is passed
    /// in so per-opportunity overrides price consistently.
    pub fn expected_net_usd(&self, edge_bps: f64, notional_usd: f64, gas_usd: f64) -> f64 {
        Self::expected_net_from_parts(
            edge_bps,
            notional_usd,
            self.friction.route_fee_bps(),
            gas_usd,
            self.adverse_selection_usd(notional_usd),
            self.friction.extra_usd + self.flash_loan_cost_usd(notional_usd),
            self.fail_prob,
        )
    }
}
