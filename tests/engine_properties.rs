//! Property-based tests for the swap curve, sizing and failure arithmetic

use approx::relative_eq;
use proptest::prelude::*;

use xyk_arb_engine::amm::xyk;
use xyk_arb_engine::costs::CostModel;
use xyk_arb_engine::sizing::{SizeOptimizer, SizingLimits};

// Property: swap output is positive and strictly inside the output reserve
proptest! {
    #[test]
    fn output_stays_inside_reserve(
        dx in 1.0..1_000_000.0f64,
        reserve_in in 1_000.0..100_000_000.0f64,
        reserve_out in 1_000.0..100_000_000.0f64,
        fee_bps in 0.0..9_999.0f64,
    ) {
        let dy = xyk::output_given_input(dx, reserve_in, reserve_out, fee_bps);
        prop_assert!(dy >= 0.0);
        prop_assert!(dy < reserve_out);
    }
}

// Property: more input never buys less output
proptest! {
    #[test]
    fn output_monotonic_in_input(
        dx in 0.0..1_000_000.0f64,
        delta in 0.0..1_000_000.0f64,
        reserve_in in 1_000.0..100_000_000.0f64,
        reserve_out in 1_000.0..100_000_000.0f64,
        fee_bps in 0.0..9_999.0f64,
    ) {
        let smaller = xyk::output_given_input(dx, reserve_in, reserve_out, fee_bps);
        let larger = xyk::output_given_input(dx + delta, reserve_in, reserve_out, fee_bps);
        prop_assert!(smaller <= larger + 1e-9);
    }
}

// Property: a higher fee never pays more
proptest! {
    #[test]
    fn higher_fee_never_pays_more(
        dx in 1.0..1_000_000.0f64,
        reserve_in in 1_000.0..100_000_000.0f64,
        reserve_out in 1_000.0..100_000_000.0f64,
        fee_bps in 0.0..9_000.0f64,
        fee_extra_bps in 0.0..999.0f64,
    ) {
        let cheap = xyk::output_given_input(dx, reserve_in, reserve_out, fee_bps);
        let pricey = xyk::output_given_input(dx, reserve_in, reserve_out, fee_bps + fee_extra_bps);
        prop_assert!(pricey <= cheap + 1e-9);
    }
}

// Property: price impact grows with trade size and is zero only at zero
proptest! {
    #[test]
    fn slippage_monotonic_in_size(
        dx in 1e-6..1_000_000.0f64,
        delta in 0.1..1_000_000.0f64,
        reserve_in in 1_000.0..100_000_000.0f64,
    ) {
        prop_assert_eq!(xyk::slippage_bps(0.0, reserve_in), 0.0);
        let small = xyk::slippage_bps(dx, reserve_in);
        let large = xyk::slippage_bps(dx + delta, reserve_in);
        prop_assert!(small > 0.0);
        prop_assert!(large > small);
    }
}

// Property: the slippage-cap inverse really inverts slippage_bps
proptest! {
    #[test]
    fn slippage_cap_inversion(
        reserve_in in 1_000.0..1_000_000_000.0f64,
        cap_bps in 1.0..9_999.0f64,
    ) {
        let dx = xyk::max_input_for_slippage_cap(reserve_in, cap_bps);
        prop_assert!(dx > 0.0);
        let realized = xyk::slippage_bps(dx, reserve_in);
        prop_assert!(relative_eq!(realized, cap_bps, max_relative = 1e-9));
    }
}

// Property: the optimizer stays inside its bounds and never trades at a loss
proptest! {
    #[test]
    fn optimizer_stays_in_bounds(
        reserve_in in 10_000.0..10_000_000.0f64,
        reserve_out in 10_000.0..10_000_000.0f64,
        fee_bps in 0.0..100.0f64,
        output_usd_price in 0.9..1.2f64,
        slip_cap_bps in 5.0..500.0f64,
    ) {
        let optimizer = SizeOptimizer::default();
        let limits = SizingLimits {
            slip_cap_bps,
            notional_cap_usd: 0.0,
        };
        let result = optimizer.solve(
            reserve_in,
            reserve_out,
            fee_bps,
            output_usd_price,
            &limits,
            |dx, notional| notional - dx,
        );

        let dx_max = (reserve_in * optimizer.max_pool_fraction)
            .min(xyk::max_input_for_slippage_cap(reserve_in, slip_cap_bps));
        prop_assert!(result.chosen_dx >= 0.0);
        prop_assert!(result.chosen_dx <= dx_max * (1.0 + 1e-9));
        prop_assert!(result.net_usd >= 0.0);
        if result.chosen_dx > 0.0 {
            prop_assert!(result.net_usd > 0.0);
            prop_assert!(result.slip_bps <= slip_cap_bps + 1e-6);
        }
    }
}

// Property: the failure blend interpolates between full net and burned gas
proptest! {
    #[test]
    fn failure_blend_stays_between_endpoints(
        net_usd in -10_000.0..10_000.0f64,
        gas_usd in 0.0..100.0f64,
        fail_prob in 0.0..1.0f64,
    ) {
        prop_assert_eq!(CostModel::apply_failure(net_usd, gas_usd, 0.0), net_usd);
        prop_assert_eq!(CostModel::apply_failure(net_usd, gas_usd, 1.0), -gas_usd);

        let blended = CostModel::apply_failure(net_usd, gas_usd, fail_prob);
        let lo = net_usd.min(-gas_usd);
        let hi = net_usd.max(-gas_usd);
        prop_assert!(blended >= lo - 1e-9);
        prop_assert!(blended <= hi + 1e-9);
    }
}
