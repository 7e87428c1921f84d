//! Performance clustering by profit margin percentile.
//!
//! Stores are split into high / medium / low tiers at the p25 and p75 margin
//! boundaries. Boundary ties favor the higher tier, so with fewer than four
//! distinct margins (where p25 can equal p75) a store sitting exactly on the
//! collapsed boundary lands in `high`, never ambiguously between tiers.

use storelens_stats::{percentile, weighted_ratio};

use crate::types::{ClusterAverages, ClusterGroup, ClusterSection, StoreMetrics};

/// Partition stores into three performance tiers.
///
/// The groups partition the input exactly: every store lands in one tier and
/// the three counts sum to the input length. Empty input yields three empty
/// groups.
pub fn partition(stores: &[StoreMetrics]) -> ClusterSection {
    let margins: Vec<f64> = stores.iter().map(|s| s.profit_margin).collect();
    let p25 = percentile(&margins, 25.0);
    let p75 = percentile(&margins, 75.0);

    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut low = Vec::new();
    for store in stores {
        if store.profit_margin >= p75 {
            high.push(store);
        } else if store.profit_margin >= p25 {
            medium.push(store);
        } else {
            low.push(store);
        }
    }

    let n = stores.len();
    ClusterSection {
        high_performance: build_group(
            &high,
            n,
            format!("Profit margin at or above the 75th percentile ({:.1}%)", p75),
        ),
        medium_performance: build_group(
            &medium,
            n,
            format!(
                "Profit margin between the 25th ({:.1}%) and 75th ({:.1}%) percentiles",
                p25, p75
            ),
        ),
        low_performance: build_group(
            &low,
            n,
            format!("Profit margin below the 25th percentile ({:.1}%)", p25),
        ),
        summary: String::new(),
    }
}

fn build_group(members: &[&StoreMetrics], total: usize, characteristics: String) -> ClusterGroup {
    let count = members.len();
    let percentage = if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    // Top stores: revenue descending, name ascending on ties.
    let mut by_revenue: Vec<&&StoreMetrics> = members.iter().collect();
    by_revenue.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.store_name.cmp(&b.store_name))
    });
    let top_stores: Vec<String> = by_revenue
        .iter()
        .take(3)
        .map(|s| s.store_name.clone())
        .collect();

    ClusterGroup {
        count,
        percentage,
        avg_metrics: build_averages(members),
        top_stores,
        members: members.iter().map(|s| s.store_name.clone()).collect(),
        characteristics,
    }
}

fn build_averages(members: &[&StoreMetrics]) -> ClusterAverages {
    if members.is_empty() {
        return ClusterAverages::default();
    }
    let n = members.len() as f64;
    let total_revenue: f64 = members.iter().map(|s| s.total_revenue).sum();
    let total_profit: f64 = members.iter().map(|s| s.total_profit).sum();

    ClusterAverages {
        avg_order_count: members.iter().map(|s| s.order_count as f64).sum::<f64>() / n,
        avg_revenue: total_revenue / n,
        avg_profit: total_profit / n,
        // The group's margin is the ratio of its totals, not a mean of
        // per-store margins.
        avg_profit_margin: weighted_ratio(total_profit, total_revenue),
        avg_aov: members.iter().map(|s| s.aov).sum::<f64>() / n,
        avg_marketing_cost_rate: members.iter().map(|s| s.marketing_cost_rate).sum::<f64>() / n,
        avg_delivery_cost_rate: members.iter().map(|s| s.delivery_cost_rate).sum::<f64>() / n,
    }
}
