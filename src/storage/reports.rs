//! Scored batch and replay report storage

use anyhow::Result;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::info;

use crate::types::{BacktestMetrics, MonteCarloSummary, ScoredOpportunity};

pub fn save_scored_batch(batch: &[ScoredOpportunity]) -> Result<()> {
    if batch.is_empty() {
        return Ok(());
    }
    let filename = format!(
        "output/reports/scored_{}.jsonl",
        Utc::now().format("%Y-%m-%d")
    );

    let mut file = OpenOptions::new().create(true).append(true).open(&filename)?;
    for scored in batch {
        writeln!(file, "{}", serde_json::to_string(scored)?)?;
    }

    info!(
        count = batch.len(),
        filename = %filename,
        "Saved scored batch"
    );

    Ok(())
}

pub fn save_backtest_metrics(metrics: &BacktestMetrics) -> Result<()> {
    let filename = format!(
        "output/reports/backtest_{}.jsonl",
        Utc::now().format("%Y-%m-%d")
    );

    let mut file = OpenOptions::new().create(true).append(true).open(&filename)?;
    writeln!(file, "{}", serde_json::to_string(metrics)?)?;

    info!(
        trades = metrics.count,
        net_usd = metrics.total_net_usd,
        "Saved backtest metrics"
    );

    Ok(())
}

pub fn save_monte_carlo_summary(summary: &MonteCarloSummary) -> Result<()> {
    let filename = format!(
        "output/reports/monte_carlo_{}.jsonl",
        Utc::now().format("%Y-%m-%d")
    );

    let mut file = OpenOptions::new().create(true).append(true).open(&filename)?;
    writeln!(file, "{}", serde_json::to_string(summary)?)?;

    info!(
        runs = summary.runs,
        swept = %summary.swept,
        mean_net_usd = summary.mean_net_usd,
        "Saved Monte Carlo summary"
    );

    Ok(())
}
