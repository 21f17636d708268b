//! Loading opportunity batches and replay tables from JSONL files

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::info;

use crate::types::{BacktestRecord, Opportunity};

/// Reads one deserializable row per line, skipping blank lines.
pub fn load_jsonl<T: DeserializeOwned>(path: &str) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("opening {path}"))?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line)
            .with_context(|| format!("parsing {path} line {}", idx + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn load_opportunities(path: &str) -> Result<Vec<Opportunity>> {
    let rows: Vec<Opportunity> = load_jsonl(path)?;
    info!(count = rows.len(), path, "Loaded opportunity batch");
    Ok(rows)
}

/// Loads replay rows, time-ordered for inspection and reporting.
pub fn load_backtest_records(path: &str) -> Result<Vec<BacktestRecord>> {
    let mut rows: Vec<BacktestRecord> = load_jsonl(path)?;
    rows.sort_by_key(|row| row.ts);
    info!(count = rows.len(), path, "Loaded backtest records");
    Ok(rows)
}
