//! Arbitrage sizing engine - Main Entry Point
//!
//! Evaluates an opportunity batch end to end, then replays a recorded
//! opportunity table when one is available.

use anyhow::Result;
use rand::Rng;
use tracing::{info, warn};
use xyk_arb_engine::*;

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging()?;
    utils::setup_output_directories()?;

    // Load configuration
    let config = CONFIG.clone();

    info!("⚙️  xyk Arb Engine v0.3.0 - Sizing & Evaluation");
    info!("📋 Configuration:");
    info!(
        "   Gas: {} + {} gwei on {} units (native ${})",
        config.gas.base_fee_gwei,
        config.gas.priority_tip_gwei,
        config.gas.gas_limit,
        config.gas.native_usd_price
    );
    info!("   Slippage Cap: {} bps", config.slip_cap_bps);
    info!("   Notional Cap: ${}", config.notional_cap_usd);
    info!("   Pool Fraction: {}", config.max_pool_fraction);
    info!("   Gas Budget: ${}", config.gas_budget_usd);
    info!("   Fail Probability: {}", config.fail_prob);

    let evaluator = arbitrage::BatchEvaluator {
        model: config.cost_model(),
        optimizer: config.optimizer(),
        limits: config.sizing_limits(),
        weights: config.weights,
    };

    let batch = match storage::load_opportunities(&config.opportunities_file) {
        Ok(batch) if !batch.is_empty() => batch,
        Ok(_) => {
            info!("📂 Opportunity file is empty; evaluating a demo batch");
            demo_batch()
        }
        Err(err) => {
            info!("📂 No opportunity file ({err:#}); evaluating a demo batch");
            demo_batch()
        }
    };
    let batch: Vec<Opportunity> = batch
        .into_iter()
        .filter(|opportunity| {
            if opportunity.has_valid_route() {
                true
            } else {
                warn!(pair = %opportunity.pair, "Dropping opportunity without a route");
                false
            }
        })
        .collect();

    info!("🔎 Evaluating {} opportunities...", batch.len());
    let scored = evaluator.evaluate_batch(&batch);
    let selected = arbitrage::select_within_gas_budget(&scored, config.gas_budget_usd);

    for entry in &selected {
        utils::print_scored_opportunity(entry);
    }
    utils::print_selection_summary(&selected, config.gas_budget_usd);
    storage::save_scored_batch(&scored)?;

    run_replay_stage(&config)?;

    info!("✅ Done");
    Ok(())
}

/// Backtest, calibration and Monte Carlo over the recorded table, when the
/// operator provides one.
fn run_replay_stage(config: &Config) -> Result<()> {
    let records = match storage::load_backtest_records(&config.backtest_records_file) {
        Ok(records) if !records.is_empty() => records,
        Ok(_) => {
            info!("📂 Backtest records file is empty; skipping replay");
            return Ok(());
        }
        Err(err) => {
            info!("📂 No backtest records ({err:#}); skipping replay");
            return Ok(());
        }
    };

    let metrics = backtest::run_backtest(&records, &config.backtest);
    utils::print_backtest_metrics(&metrics);
    storage::save_backtest_metrics(&metrics)?;

    let problem = backtest::CalibrationProblem::new(&records, backtest::Objective::TotalNet);
    let candidates: Vec<BacktestParams> = [0.75, 1.0, 1.5]
        .iter()
        .map(|multiplier| BacktestParams {
            gas_multiplier: *multiplier,
            ..config.backtest.clone()
        })
        .collect();
    if let Some((best, best_metrics, score)) = problem.grid_search(&candidates) {
        info!(
            "🔧 Calibration: gas multiplier {} scores {:.2} over {} trades",
            best.gas_multiplier, score, best_metrics.count
        );
    }

    let summary = backtest::run_monte_carlo(
        &records,
        &config.backtest,
        &backtest::SweepGrid::slippage_bps(),
        &config.monte_carlo,
    );
    utils::print_monte_carlo_summary(&summary);
    storage::save_monte_carlo_summary(&summary)?;

    Ok(())
}

/// Synthetic batch exercising the pipeline when no input file is provided.
fn demo_batch() -> Vec<Opportunity> {
    let mut rng = rand::rng();
    let venues = [
        ("WETH/USDC", "aero:vAMM -> uni:v3"),
        ("WETH/DAI", "uni:v3 -> aero:vAMM"),
        ("OP/USDC", "velo:vAMM -> uni:v3"),
        ("WBTC/USDC", "uni:v3 -> sushi:v2"),
        ("ARB/USDC", "camelot:v2 -> uni:v3"),
        ("WETH/USDT", "aero:vAMM -> sushi:v2"),
    ];

    venues
        .iter()
        .enumerate()
        .map(|(idx, (pair, route))| Opportunity {
            pair: pair.to_string(),
            route: route.to_string(),
            reserve_in: rng.random_range(2e5..5e6),
            reserve_out: rng.random_range(2e5..5e6),
            pool_fee_bps: if idx % 2 == 0 { 30.0 } else { 5.0 },
            output_token_usd_price: rng.random_range(0.98..1.02),
            edge_bps: rng.random_range(-20.0..180.0),
            gas_limit: (idx % 3 == 0).then_some(350_000),
        })
        .collect()
}
