//! Golden-section search for the most profitable input size
//!
//! The objective is the caller-supplied net-USD function evaluated on the
//! pool curve, with hard constraint breaches mapped to large negative
//! penalties. Penalty magnitudes are ordered so an invalid size always loses
//! to a slippage breach, which always loses to a notional breach, which
//! always loses to any real net value.

use serde::{Deserialize, Serialize};

use crate::amm::xyk;
use crate::types::SizingResult;

const PENALTY_NON_POSITIVE_SIZE: f64 = -1e12;
const PENALTY_SLIPPAGE_BREACH: f64 = -1e11;
const PENALTY_NOTIONAL_BREACH: f64 = -1e10;

/// Smallest input the search will consider, in input-token units.
const MIN_TRADE_INPUT: f64 = 1e-12;

/// Hard per-trade constraints applied inside the sizing objective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingLimits {
    /// Maximum tolerated price impact in basis points.
    pub slip_cap_bps: f64,
    /// Maximum output notional in USD. Zero or negative disables the cap.
    pub notional_cap_usd: f64,
}

impl Default for SizingLimits {
    fn default() -> Self {
        Self {
            slip_cap_bps: 50.0,
            notional_cap_usd: 50_000.0,
        }
    }
}

/// Derivative-free maximizer over `[MIN_TRADE_INPUT, dx_max]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeOptimizer {
    /// Fraction of the input reserve the search may consume.
    pub max_pool_fraction: f64,
    pub max_iterations: u32,
    /// Relative bracket width at which the search stops early.
    pub tolerance: f64,
}

impl Default for SizeOptimizer {
    fn default() -> Self {
        Self {
            max_pool_fraction: 0.25,
            max_iterations: 64,
            tolerance: 1e-9,
        }
    }
}

impl SizeOptimizer {
    /// Searches for the input size maximizing `net_fn(dx, notional_usd)`.
    ///
    /// Returns [`SizingResult::no_trade`] when the pool is degenerate, the
    /// constraints leave no feasible size, or the best achievable net is not
    /// strictly positive. The upper bound is the tighter of the pool-fraction
    /// limit and the exact input that reaches the slippage cap, so the search
    /// interval never leaves the feasible slippage region.
    pub fn solve<F>(
        &self,
        reserve_in: f64,
        reserve_out: f64,
        fee_bps: f64,
        output_usd_price: f64,
        limits: &SizingLimits,
        net_fn: F,
    ) -> SizingResult
    where
        F: Fn(f64, f64) -> f64,
    {
        if !reserve_in.is_finite()
            || !reserve_out.is_finite()
            || reserve_in <= 0.0
            || reserve_out <= 0.0
            || output_usd_price <= 0.0
        {
            return SizingResult::no_trade();
        }

        let dx_max = (reserve_in * self.max_pool_fraction)
            .min(xyk::max_input_for_slippage_cap(reserve_in, limits.slip_cap_bps));
        if dx_max <= MIN_TRADE_INPUT {
            return SizingResult::no_trade();
        }

        let objective = |dx: f64| -> f64 {
            if dx <= 0.0 {
                return PENALTY_NON_POSITIVE_SIZE;
            }
            if xyk::slippage_bps(dx, reserve_in) > limits.slip_cap_bps {
                return PENALTY_SLIPPAGE_BREACH;
            }
            let dy = xyk::output_given_input(dx, reserve_in, reserve_out, fee_bps);
            let notional = dy * output_usd_price;
            if limits.notional_cap_usd > 0.0 && notional > limits.notional_cap_usd {
                return PENALTY_NOTIONAL_BREACH;
            }
            net_fn(dx, notional)
        };

        // Track the best point seen across every evaluation. Constraint
        // penalties put cliffs in the objective, and the final bracket
        // midpoint can land on the wrong side of one.
        let mut best_dx = 0.0;
        let mut best_net = f64::NEG_INFINITY;
        let mut consider = |dx: f64, net: f64| {
            if net > best_net {
                best_dx = dx;
                best_net = net;
            }
        };

        let inv_phi = (5.0_f64.sqrt() - 1.0) / 2.0;
        let mut lo = MIN_TRADE_INPUT;
        let mut hi = dx_max;
        let mut x1 = hi - inv_phi * (hi - lo);
        let mut x2 = lo + inv_phi * (hi - lo);
        let mut f1 = objective(x1);
        let mut f2 = objective(x2);
        consider(x1, f1);
        consider(x2, f2);

        for _ in 0..self.max_iterations {
            if hi - lo <= self.tolerance * hi.abs().max(1.0) {
                break;
            }
            if f1 >= f2 {
                hi = x2;
                x2 = x1;
                f2 = f1;
                x1 = hi - inv_phi * (hi - lo);
                f1 = objective(x1);
                consider(x1, f1);
            } else {
                lo = x1;
                x1 = x2;
                f1 = f2;
                x2 = lo + inv_phi * (hi - lo);
                f2 = objective(x2);
                consider(x2, f2);
            }
        }

        let midpoint = 0.5 * (lo + hi);
        consider(midpoint, objective(midpoint));
        // The slippage cap often binds exactly at dx_max; the interior search
        // only approaches it from below.
        consider(dx_max, objective(dx_max));

        if !(best_net > 0.0) {
            return SizingResult::no_trade();
        }

        let dy = xyk::output_given_input(best_dx, reserve_in, reserve_out, fee_bps);
        SizingResult {
            chosen_dx: best_dx,
            net_usd: best_net,
            slip_bps: xyk::slippage_bps(best_dx, reserve_in),
            notional_usd: dy * output_usd_price,
        }
    }
}
