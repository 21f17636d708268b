//! Cost-parameter bundles consumed by the pricing model

use serde::{Deserialize, Serialize};

/// EIP-1559 style gas pricing in operator-facing gwei units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GasParameters {
    /// Average recent base fee.
    pub base_fee_gwei: f64,
    /// Tip paid for inclusion.
    pub priority_tip_gwei: f64,
    /// Expected gas units for one swap transaction.
    pub gas_limit: u64,
    /// USD price of the chain's native token.
    pub native_usd_price: f64,
    /// Hard ceiling on the modeled gas cost per trade.
    pub max_gas_usd_cap: f64,
}

impl Default for GasParameters {
    fn default() -> Self {
        Self {
            base_fee_gwei: 0.5,
            priority_tip_gwei: 0.5,
            gas_limit: 200_000,
            native_usd_price: 1.0,
            max_gas_usd_cap: 1e9,
        }
    }
}

/// Timing assumptions between signal and on-chain inclusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyParameters {
    /// Time from signal to transaction sign/broadcast.
    pub decision_delay_ms: f64,
    /// Blocks until inclusion.
    pub inclusion_blocks: u32,
    /// L2 cadence by default; set ~12 for mainnet.
    pub seconds_per_block: f64,
    /// USD adverse drift per sqrt(second) per $1 of notional.
    pub k_vol: f64,
    /// Linear coefficient on notional for drift.
    pub notional_beta: f64,
}

impl Default for LatencyParameters {
    fn default() -> Self {
        Self {
            decision_delay_ms: 250.0,
            inclusion_blocks: 1,
            seconds_per_block: 1.0,
            k_vol: 0.0,
            notional_beta: 1.0,
        }
    }
}

/// Route-level fees and fixed overheads, all negative carry for the trade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrictionParameters {
    pub lp_fee_bps: f64,
    pub router_fee_bps: f64,
    /// MEV tip, relayer, and similar fixed USD overheads.
    pub extra_usd: f64,
    /// Flash-loan fee proportional to notional.
    pub flash_fee_bps: f64,
    /// Fixed overhead per flash loan.
    pub flash_fixed_usd: f64,
    /// Optional referral fee on notional.
    pub referral_bps: f64,
    /// On-chain executor service fee.
    pub executor_fee_usd: f64,
}

impl FrictionParameters {
    /// Route fees deducted from gross edge, summed before ratio conversion.
    pub fn route_fee_bps(&self) -> f64 {
        self.lp_fee_bps + self.router_fee_bps
    }
}
