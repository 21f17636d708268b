//! Single-pass replay of recorded opportunities under a cost parameter set
//!
//! The replay shares its gas and failure arithmetic with the live sizing
//! path through [`crate::costs`], so parameters calibrated here describe
//! nets the live path can actually realize.

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::costs::{gas_cost_usd, CostModel};
use crate::types::{BacktestMetrics, BacktestParams, BacktestRecord};
use crate::utils::{mean, sample_std, BPS_SCALE};

/// Per-trade efficiency when a trade cost no gas at all.
const ZERO_GAS_EFFICIENCY_SCALE: f64 = 1e6;

/// Replays rows under a cost parameter set. Row costing is data-parallel;
/// surviving rows are then re-sorted by timestamp so the equity curve walks
/// trade time regardless of input order. An empty post-filter batch returns
/// [`BacktestMetrics::zero`], never an error.
pub fn run_backtest(records: &[BacktestRecord], params: &BacktestParams) -> BacktestMetrics {
    // (ts, gross, net, efficiency) per surviving row.
    let mut costed: Vec<(DateTime<Utc>, f64, f64, f64)> = records
        .par_iter()
        .filter_map(|record| {
            if record.spread_bps < params.min_spread_bps
                || record.liquidity_usd < params.min_liquidity_usd
            {
                return None;
            }

            // Caps bound the simulated fill, not the recorded gross.
            let mut notional = record.notional_usd.min(params.max_trade_usd);
            if let Some(cap) = params.notional_cap_usd {
                if cap > 0.0 && cap.is_finite() {
                    notional = notional.min(cap);
                }
            }

            let (gas_usd, net) = match &params.extended {
                None => {
                    let gas_usd = record.gas_usd * params.gas_multiplier;
                    let cost_bps = params.slippage_bps + params.fees_bps;
                    let net = record.gross_usd - gas_usd - cost_bps / BPS_SCALE * notional;
                    (gas_usd, net)
                }
                Some(extended) => {
                    let gas_usd = gas_cost_usd(&extended.gas_parameters(), extended.gas_limit);
                    let cost_bps = params.slippage_bps
                        + params.fees_bps
                        + extended.lp_fee_bps
                        + extended.router_fee_bps
                        + extended.friction_bps;
                    let latency_usd =
                        extended.latency_ms * extended.latency_bps_penalty / BPS_SCALE * notional;
                    let net_before_fail = record.gross_usd
                        - gas_usd
                        - cost_bps / BPS_SCALE * notional
                        - extended.extra_usd
                        - latency_usd;
                    let net =
                        CostModel::apply_failure(net_before_fail, gas_usd, extended.fail_prob);
                    (gas_usd, net)
                }
            };

            let efficiency = if gas_usd > 0.0 {
                net / gas_usd
            } else {
                net * ZERO_GAS_EFFICIENCY_SCALE
            };
            Some((record.ts, record.gross_usd, net, efficiency))
        })
        .collect();

    if costed.is_empty() {
        return BacktestMetrics::zero();
    }

    // Drawdown is defined on the time-ordered equity curve.
    costed.sort_by_key(|row| row.0);

    let count = costed.len();
    let total_gross: f64 = costed.iter().map(|(_, gross, _, _)| gross).sum();
    let nets: Vec<f64> = costed.iter().map(|(_, _, net, _)| *net).collect();
    let efficiencies: Vec<f64> = costed.iter().map(|(_, _, _, efficiency)| *efficiency).collect();
    let wins = nets.iter().filter(|net| **net > 0.0).count();

    let mut equity = 0.0;
    let mut peak = f64::NEG_INFINITY;
    let mut max_drawdown = 0.0_f64;
    for net in &nets {
        equity += net;
        peak = peak.max(equity);
        max_drawdown = max_drawdown.min(equity - peak);
    }

    let std_net = sample_std(&nets);
    let sharpe_proxy = if count >= 2 && std_net > 0.0 {
        mean(&nets) / std_net
    } else {
        0.0
    };

    BacktestMetrics {
        total_gross_usd: total_gross,
        total_net_usd: nets.iter().sum(),
        win_rate: wins as f64 / count as f64,
        avg_profit_per_gas: mean(&efficiencies),
        max_drawdown_usd: max_drawdown,
        sharpe_proxy,
        count,
    }
}
