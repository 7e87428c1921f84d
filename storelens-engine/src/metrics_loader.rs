//! CSV dataset loader.
//!
//! Parses per-store metrics CSV into validated `StoreMetrics`. Expected
//! columns:
//!   store_name, order_count, total_revenue, total_profit, aov,
//!   marketing_cost_rate, delivery_cost_rate
//!
//! `order_count` is read as a signed integer so a negative value reaches
//! validation (and is rejected there) instead of failing deserialization
//! with an unhelpful parse error. Any `profit_margin` column in the file is
//! ignored — the margin is always recomputed from totals.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use crate::error::EngineResult;
use crate::types::{StoreMetrics, StoreMetricsDelta};

/// One raw CSV row before validation.
#[derive(Debug, Deserialize)]
struct MetricsRow {
    store_name: String,
    order_count: i64,
    total_revenue: f64,
    total_profit: f64,
    aov: f64,
    marketing_cost_rate: f64,
    delivery_cost_rate: f64,
}

/// Load and validate store metrics from a CSV reader.
pub fn load_metrics<R: Read>(reader: R) -> EngineResult<Vec<StoreMetrics>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut stores = Vec::new();
    for result in csv_reader.deserialize() {
        let row: MetricsRow = result?;
        stores.push(StoreMetrics::new(
            row.store_name,
            row.order_count,
            row.total_revenue,
            row.total_profit,
            row.aov,
            row.marketing_cost_rate,
            row.delivery_cost_rate,
        )?);
    }

    Ok(stores)
}

/// Load and validate store metrics from a CSV file path.
pub fn load_metrics_file(path: &str) -> EngineResult<Vec<StoreMetrics>> {
    let file = std::fs::File::open(path)?;
    load_metrics(file)
}

/// Join a current and a previous period on `store_name`.
///
/// Inner join: stores present in only one period carry no trend signal and
/// are skipped with a warning.
pub fn pair_periods(
    current: Vec<StoreMetrics>,
    previous: Vec<StoreMetrics>,
) -> Vec<StoreMetricsDelta> {
    let mut previous_by_name: HashMap<String, StoreMetrics> = previous
        .into_iter()
        .map(|s| (s.store_name.clone(), s))
        .collect();

    let mut deltas = Vec::new();
    for cur in current {
        match previous_by_name.remove(&cur.store_name) {
            Some(prev) => deltas.push(StoreMetricsDelta::new(cur, prev)),
            None => log::warn!(
                "store '{}' has no previous-period record; skipping from trend analysis",
                cur.store_name
            ),
        }
    }
    for leftover in previous_by_name.keys() {
        log::warn!(
            "store '{}' disappeared from the current period; skipping from trend analysis",
            leftover
        );
    }

    deltas
}

/// Load both periods from CSV files and pair them.
pub fn load_paired_files(
    current_path: &str,
    previous_path: &str,
) -> EngineResult<Vec<StoreMetricsDelta>> {
    let current = load_metrics_file(current_path)?;
    let previous = load_metrics_file(previous_path)?;
    Ok(pair_periods(current, previous))
}
