//! Backtest row, parameter and metrics types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GasParameters;

/// One historical or simulated opportunity row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestRecord {
    pub ts: DateTime<Utc>,
    pub spread_bps: f64,
    pub gross_usd: f64,
    /// Baseline gas estimate recorded at detection time.
    pub gas_usd: f64,
    pub notional_usd: f64,
    pub liquidity_usd: f64,
}

/// Replay parameters. The optional `extended` block switches the cost model
/// from the simple baseline-gas path to the full gas/latency/failure path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestParams {
    pub min_spread_bps: f64,
    pub min_liquidity_usd: f64,
    pub max_trade_usd: f64,
    pub notional_cap_usd: Option<f64>,
    pub slippage_bps: f64,
    pub fees_bps: f64,
    pub gas_multiplier: f64,
    pub extended: Option<ExtendedCosts>,
}

impl Default for BacktestParams {
    fn default() -> Self {
        Self {
            min_spread_bps: 10.0,
            min_liquidity_usd: 10_000.0,
            max_trade_usd: 50_000.0,
            notional_cap_usd: None,
            slippage_bps: 30.0,
            fees_bps: 5.0,
            gas_multiplier: 1.0,
            extended: None,
        }
    }
}

/// Extended replay costs, constant across a parameter set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedCosts {
    pub base_fee_gwei: f64,
    pub priority_tip_gwei: f64,
    pub gas_limit: u64,
    pub native_usd_price: f64,
    pub max_gas_usd_cap: f64,
    pub lp_fee_bps: f64,
    pub router_fee_bps: f64,
    pub friction_bps: f64,
    pub extra_usd: f64,
    pub latency_ms: f64,
    pub latency_bps_penalty: f64,
    pub fail_prob: f64,
}

impl Default for ExtendedCosts {
    fn default() -> Self {
        Self {
            base_fee_gwei: 0.0,
            priority_tip_gwei: 0.0,
            gas_limit: 250_000,
            native_usd_price: 1.0,
            max_gas_usd_cap: 1e9,
            lp_fee_bps: 0.0,
            router_fee_bps: 0.0,
            friction_bps: 0.0,
            extra_usd: 0.0,
            latency_ms: 0.0,
            latency_bps_penalty: 0.0,
            fail_prob: 0.0,
        }
    }
}

impl ExtendedCosts {
    /// View of the gas fields as the canonical gas parameter bundle.
    pub fn gas_parameters(&self) -> GasParameters {
        GasParameters {
            base_fee_gwei: self.base_fee_gwei,
            priority_tip_gwei: self.priority_tip_gwei,
            gas_limit: self.gas_limit,
            native_usd_price: self.native_usd_price,
            max_gas_usd_cap: self.max_gas_usd_cap,
        }
    }
}

/// Aggregate replay metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestMetrics {
    pub total_gross_usd: f64,
    pub total_net_usd: f64,
    /// Fraction of trades with strictly positive net.
    pub win_rate: f64,
    pub avg_profit_per_gas: f64,
    /// Worst peak-to-trough decline of the cumulative net curve, ≤ 0.
    pub max_drawdown_usd: f64,
    /// Un-annualized mean/stdev of per-trade net.
    pub sharpe_proxy: f64,
    pub count: usize,
}

impl BacktestMetrics {
    /// Well-defined result for an empty post-filter batch.
    pub fn zero() -> Self {
        Self {
            total_gross_usd: 0.0,
            total_net_usd: 0.0,
            win_rate: 0.0,
            avg_profit_per_gas: 0.0,
            max_drawdown_usd: 0.0,
            sharpe_proxy: 0.0,
            count: 0,
        }
    }
}

/// Cross-run aggregate of a Monte Carlo sensitivity sweep.
#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloSummary {
    pub runs: usize,
    /// Label of the swept parameter.
    pub swept: String,
    pub mean_net_usd: f64,
    pub std_net_usd: f64,
    /// Mean absolute max drawdown across runs.
    pub mean_drawdown_usd: f64,
    pub worst_run_net_usd: f64,
}

impl MonteCarloSummary {
    pub fn zero(swept: &str) -> Self {
        Self {
            runs: 0,
            swept: swept.to_string(),
            mean_net_usd: 0.0,
            std_net_usd: 0.0,
            mean_drawdown_usd: 0.0,
            worst_run_net_usd: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_deserialize_with_partial_json() {
        let params: BacktestParams =
            serde_json::from_str(r#"{"min_spread_bps": 25.0, "gas_multiplier": 1.5}"#)
                .expect("partial params should deserialize");
        assert_eq!(params.min_spread_bps, 25.0);
        assert_eq!(params.gas_multiplier, 1.5);
        assert_eq!(params.fees_bps, 5.0);
        assert!(params.extended.is_none());
    }

    #[test]
    fn test_extended_gas_view_matches_fields() {
        let ext = ExtendedCosts {
            base_fee_gwei: 2.0,
            priority_tip_gwei: 0.5,
            gas_limit: 300_000,
            native_usd_price: 2_500.0,
            ..Default::default()
        };
        let gas = ext.gas_parameters();
        assert_eq!(gas.base_fee_gwei, 2.0);
        assert_eq!(gas.gas_limit, 300_000);
        assert_eq!(gas.max_gas_usd_cap, 1e9);
    }
}
