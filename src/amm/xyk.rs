//! Swap math for constant-product ("xyk") pools
//!
//! Quantities are token units on the pool's own scale; USD conversion happens
//! at the call site. Degenerate inputs return zero rather than erroring so a
//! bad pool snapshot can never abort a batch evaluation.

use crate::utils::BPS_SCALE;

/// Output amount for an exact input, with the pool fee taken on the input side.
pub fn output_given_input(dx: f64, reserve_in: f64, reserve_out: f64, fee_bps: f64) -> f64 {
    if reserve_in <= 0.0 || reserve_out <= 0.0 {
        return 0.0;
    }
    let dx_eff = dx * (1.0 - fee_bps / BPS_SCALE);
    if dx_eff <= 0.0 {
        return 0.0;
    }
    dx_eff * reserve_out / (reserve_in + dx_eff)
}

/// Input amount required for an exact output. `None` when the output cannot
/// be obtained at any size (dy ≥ reserve_out, fee ≥ 100%, empty pool).
pub fn input_given_output(dy: f64, reserve_in: f64, reserve_out: f64, fee_bps: f64) -> Option<f64> {
    if reserve_in <= 0.0 || reserve_out <= 0.0 {
        return None;
    }
    if dy <= 0.0 {
        return Some(0.0);
    }
    if dy >= reserve_out {
        return None;
    }
    let fee_factor = 1.0 - fee_bps / BPS_SCALE;
    if fee_factor <= 0.0 {
        return None;
    }
    Some(reserve_in * dy / ((reserve_out - dy) * fee_factor))
}

/// Depth-consumed proxy for realized price impact, in basis points. Not the
/// exact marginal price.
pub fn slippage_bps(dx: f64, reserve_in: f64) -> f64 {
    if dx <= 0.0 || reserve_in <= 0.0 {
        return 0.0;
    }
    BPS_SCALE * dx / (reserve_in + dx)
}

/// Largest input that keeps `slippage_bps` at or below the cap. Returns 0 when
/// the cap is outside (0, 10000) bps, where the inversion is undefined or
/// unbounded.
pub fn max_input_for_slippage_cap(reserve_in: f64, cap_bps: f64) -> f64 {
    if reserve_in <= 0.0 {
        return 0.0;
    }
    let s = cap_bps / BPS_SCALE;
    if s <= 0.0 || s >= 1.0 {
        return 0.0;
    }
    reserve_in * s / (1.0 - s)
}
