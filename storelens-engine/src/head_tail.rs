//! Head/tail comparison of the best and worst performers.
//!
//! Stores are ranked by profit margin (revenue, then name, break ties) and
//! the top and bottom three are contrasted field by field. The two sets are
//! never allowed to share a member: with fewer than six stores the bottom
//! set is truncated to the stores strictly after the top selection, and with
//! three or fewer the bottom set is empty.

use std::cmp::Ordering;

use crate::types::{HeadTailSection, MetricGaps, StoreMetrics, StoreSnapshot};

/// Contrast the top and bottom performers by profit margin.
pub fn compare(stores: &[StoreMetrics]) -> HeadTailSection {
    let mut ranked: Vec<&StoreMetrics> = stores.iter().collect();
    ranked.sort_by(|a, b| {
        b.profit_margin
            .partial_cmp(&a.profit_margin)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.total_revenue
                    .partial_cmp(&a.total_revenue)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.store_name.cmp(&b.store_name))
    });

    let n = ranked.len();
    let top_len = n.min(3);
    // The bottom set starts at the later of "after the top set" and
    // "last three", so the sets stay disjoint for any n.
    let bottom_start = top_len.max(n.saturating_sub(3));

    let top: Vec<StoreSnapshot> = ranked[..top_len].iter().map(|s| snapshot(s)).collect();
    let bottom: Vec<StoreSnapshot> = ranked[bottom_start..].iter().map(|s| snapshot(s)).collect();

    let gaps = if bottom.is_empty() {
        MetricGaps::default()
    } else {
        let top_stores = &ranked[..top_len];
        let bottom_stores = &ranked[bottom_start..];
        MetricGaps {
            profit_margin: avg(top_stores, |s| s.profit_margin)
                - avg(bottom_stores, |s| s.profit_margin),
            aov: avg(top_stores, |s| s.aov) - avg(bottom_stores, |s| s.aov),
            marketing_cost_rate: avg(top_stores, |s| s.marketing_cost_rate)
                - avg(bottom_stores, |s| s.marketing_cost_rate),
            delivery_cost_rate: avg(top_stores, |s| s.delivery_cost_rate)
                - avg(bottom_stores, |s| s.delivery_cost_rate),
        }
    };

    HeadTailSection {
        top,
        bottom,
        gaps,
        summary: String::new(),
    }
}

fn snapshot(store: &StoreMetrics) -> StoreSnapshot {
    StoreSnapshot {
        store_name: store.store_name.clone(),
        profit_margin: store.profit_margin,
        total_revenue: store.total_revenue,
        aov: store.aov,
    }
}

fn avg(stores: &[&StoreMetrics], field: impl Fn(&StoreMetrics) -> f64) -> f64 {
    if stores.is_empty() {
        return 0.0;
    }
    stores.iter().map(|s| field(s)).sum::<f64>() / stores.len() as f64
}
