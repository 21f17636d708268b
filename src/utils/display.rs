//! Display and printing utilities

use tracing::{info, warn};

use crate::types::{BacktestMetrics, MonteCarloSummary, ScoredOpportunity};

pub fn print_scored_opportunity(scored: &ScoredOpportunity) {
    warn!("\n🎯 OPPORTUNITY #{}", scored.id);
    warn!(
        "📍 Pair: {} via {}",
        scored.opportunity.pair, scored.opportunity.route
    );
    warn!("💰 Sizing:");
    warn!("   Input Size: {:.6}", scored.sizing.chosen_dx);
    warn!("   Notional:   ${:.2}", scored.sizing.notional_usd);
    warn!("   Slippage:   {:.2} bps", scored.sizing.slip_bps);
    warn!("   Net Profit: ${:.2}", scored.sizing.net_usd);
    warn!("📊 Execution:");
    warn!("   Gas Cost:  ${:.4}", scored.gas_usd);
    warn!("   Inclusion: {:.2}s", scored.inclusion_seconds);
    warn!("   Score:     {:.3}", scored.score);
    warn!("");
}

pub fn print_selection_summary(selected: &[ScoredOpportunity], gas_budget_usd: f64) {
    let total_net: f64 = selected.iter().map(|s| s.sizing.net_usd).sum();
    let total_gas: f64 = selected.iter().map(|s| s.gas_usd).sum();

    info!("\n📊 Batch Selection");
    info!("   Selected: {}", selected.len());
    info!("   Total Net: ${:.2}", total_net);
    info!(
        "   Gas Spent: ${:.4} of ${:.2} budget",
        total_gas, gas_budget_usd
    );
    for entry in selected {
        info!(
            "     {} score {:.3} net ${:.2}",
            entry.opportunity.pair, entry.score, entry.sizing.net_usd
        );
    }
    info!("");
}

pub fn print_backtest_metrics(metrics: &BacktestMetrics) {
    info!("\n📈 BACKTEST RESULTS");
    info!("   Trades: {}", metrics.count);
    info!("   Gross: ${:.2}", metrics.total_gross_usd);
    info!("   Net: ${:.2}", metrics.total_net_usd);
    info!("   Win Rate: {:.1}%", metrics.win_rate * 100.0);
    info!("   Profit per Gas: {:.2}", metrics.avg_profit_per_gas);
    info!("   Max Drawdown: ${:.2}", metrics.max_drawdown_usd);
    info!("   Sharpe Proxy: {:.3}", metrics.sharpe_proxy);
    info!("");
}

pub fn print_monte_carlo_summary(summary: &MonteCarloSummary) {
    info!(
        "\n🎲 MONTE CARLO ({} runs, sweeping {})",
        summary.runs, summary.swept
    );
    info!(
        "   Mean Net: ${:.2} ± ${:.2}",
        summary.mean_net_usd, summary.std_net_usd
    );
    info!("   Mean Drawdown: ${:.2}", summary.mean_drawdown_usd);
    info!("   Worst Run: ${:.2}", summary.worst_run_net_usd);
    info!("");
}
