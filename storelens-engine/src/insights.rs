//! Top-level report orchestration.
//!
//! A single synchronous pass over an immutable snapshot: validate, run each
//! analyzer in dependency order, attach the templated summaries, stamp the
//! timestamp. No shared state survives the call, so concurrent invocations
//! need no coordination.

use chrono::Utc;
use storelens_stats::{describe, weighted_ratio};

use crate::error::{EngineError, EngineResult};
use crate::thresholds::AnalysisConfig;
use crate::types::{InsightsReport, OverviewSection, StoreMetrics, StoreMetricsDelta};
use crate::{anomaly, attribution, cluster, cost_structure, head_tail, health, recommendation,
    report_text, trend};

/// Generate the full insights report with the default thresholds.
pub fn generate_insights(
    stores: &[StoreMetrics],
    deltas: Option<&[StoreMetricsDelta]>,
) -> EngineResult<InsightsReport> {
    generate_insights_with_config(stores, deltas, &AnalysisConfig::default())
}

/// Generate the full insights report with explicit thresholds.
///
/// Every record is re-validated at entry; a data-quality rejection fails the
/// whole call. An empty dataset is not an error — each section returns its
/// documented zero/empty state.
pub fn generate_insights_with_config(
    stores: &[StoreMetrics],
    deltas: Option<&[StoreMetricsDelta]>,
    config: &AnalysisConfig,
) -> EngineResult<InsightsReport> {
    validate_dataset(stores)?;
    if let Some(deltas) = deltas {
        for delta in deltas {
            delta.current.validate()?;
            delta.previous.validate()?;
        }
    }
    log::debug!("analyzing {} stores", stores.len());

    let mut overview = build_overview(stores);
    let mut clusters = cluster::partition(stores);
    let mut anomalies = anomaly::detect(stores, config);
    let mut head_tail = head_tail::compare(stores);
    let mut attribution = attribution::analyze(stores);
    let mut health = health::score(stores);
    let mut cost_structure = cost_structure::analyze(stores, &anomalies, &clusters);
    let mut trend = deltas.map(trend::analyze);

    let recommendations =
        recommendation::generate(&anomalies, &clusters, &attribution, config);
    log::debug!(
        "{} anomalous stores, {} recommendations",
        anomalies.total_anomaly_stores,
        recommendations.len()
    );

    overview.summary = report_text::overview(&overview);
    clusters.summary = report_text::clusters(&clusters);
    anomalies.summary = report_text::anomalies(&anomalies);
    head_tail.summary = report_text::head_tail(&head_tail);
    attribution.summary = report_text::attribution(&attribution);
    health.summary = report_text::health(&health);
    cost_structure.summary = report_text::cost_structure(&cost_structure);
    if let Some(section) = trend.as_mut() {
        section.summary = report_text::trend(section);
    }

    Ok(InsightsReport {
        generated_at: Utc::now().to_rfc3339(),
        overview,
        clusters,
        anomalies,
        head_tail,
        attribution,
        trend,
        health,
        cost_structure,
        recommendations,
    })
}

/// Reject invalid records and duplicate store names up front.
fn validate_dataset(stores: &[StoreMetrics]) -> EngineResult<()> {
    let mut seen = std::collections::HashSet::new();
    for store in stores {
        store.validate()?;
        if !seen.insert(store.store_name.as_str()) {
            return Err(EngineError::DuplicateStore {
                store: store.store_name.clone(),
            });
        }
    }
    Ok(())
}

fn build_overview(stores: &[StoreMetrics]) -> OverviewSection {
    let total_revenue: f64 = stores.iter().map(|s| s.total_revenue).sum();
    let total_profit: f64 = stores.iter().map(|s| s.total_profit).sum();
    let margins: Vec<f64> = stores.iter().map(|s| s.profit_margin).collect();
    let revenues: Vec<f64> = stores.iter().map(|s| s.total_revenue).collect();

    OverviewSection {
        store_count: stores.len(),
        total_orders: stores.iter().map(|s| s.order_count).sum(),
        total_revenue,
        total_profit,
        weighted_profit_margin: weighted_ratio(total_profit, total_revenue),
        average_aov: if stores.is_empty() {
            0.0
        } else {
            stores.iter().map(|s| s.aov).sum::<f64>() / stores.len() as f64
        },
        margin_stats: describe(&margins),
        revenue_stats: describe(&revenues),
        summary: String::new(),
    }
}
