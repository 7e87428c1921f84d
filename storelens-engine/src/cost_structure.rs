//! Cost-structure aggregation and comparison.
//!
//! Absolute marketing/delivery spend is derived from each store's rate ×
//! revenue; the overall rates are weighted (summed cost over summed
//! revenue). Anomaly store lists come from the anomaly detector and the
//! high-vs-low rate comparison from the cluster partition, so the three
//! sections never disagree about who is expensive.

use storelens_stats::{describe, weighted_ratio};

use crate::types::{
    AnomalyRecord, AnomalySection, ClusterGroup, ClusterRateComparison, ClusterSection,
    CostSection, StoreMetrics,
};

/// Aggregate cost rates and contrast them across performance clusters.
pub fn analyze(
    stores: &[StoreMetrics],
    anomalies: &AnomalySection,
    clusters: &ClusterSection,
) -> CostSection {
    let total_revenue: f64 = stores.iter().map(|s| s.total_revenue).sum();
    let total_marketing_cost: f64 = stores
        .iter()
        .map(|s| s.marketing_cost_rate / 100.0 * s.total_revenue)
        .sum();
    let total_delivery_cost: f64 = stores
        .iter()
        .map(|s| s.delivery_cost_rate / 100.0 * s.total_revenue)
        .sum();

    let marketing_rates: Vec<f64> = stores.iter().map(|s| s.marketing_cost_rate).collect();
    let delivery_rates: Vec<f64> = stores.iter().map(|s| s.delivery_cost_rate).collect();

    CostSection {
        total_marketing_cost,
        total_delivery_cost,
        overall_marketing_rate: weighted_ratio(total_marketing_cost, total_revenue),
        overall_delivery_rate: weighted_ratio(total_delivery_cost, total_revenue),
        marketing_rate_stats: describe(&marketing_rates),
        delivery_rate_stats: describe(&delivery_rates),
        high_marketing_stores: store_names(&anomalies.high_marketing),
        high_delivery_stores: store_names(&anomalies.high_delivery),
        cluster_comparison: compare_clusters(
            &clusters.high_performance,
            &clusters.low_performance,
        ),
        summary: String::new(),
    }
}

fn store_names(records: &[AnomalyRecord]) -> Vec<String> {
    records.iter().map(|r| r.store_name.clone()).collect()
}

fn compare_clusters(high: &ClusterGroup, low: &ClusterGroup) -> ClusterRateComparison {
    // An empty cluster contributes zero rates (its averages default to 0).
    ClusterRateComparison {
        high_marketing_rate: high.avg_metrics.avg_marketing_cost_rate,
        high_delivery_rate: high.avg_metrics.avg_delivery_cost_rate,
        low_marketing_rate: low.avg_metrics.avg_marketing_cost_rate,
        low_delivery_rate: low.avg_metrics.avg_delivery_cost_rate,
    }
}
