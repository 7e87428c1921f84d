//! Growth/decline classification from a paired current/previous dataset.
//!
//! Each store lands in exactly one bucket. The revenue change decides when
//! it is non-zero; otherwise the profit change does. A fully flat store
//! (both rates zero) counts as growing — it has not declined.

use std::cmp::Ordering;

use crate::types::{StoreMetricsDelta, TrendHighlight, TrendSection};

/// Bucket stores into growing and declining, with the top movers of each.
pub fn analyze(deltas: &[StoreMetricsDelta]) -> TrendSection {
    let mut growing: Vec<&StoreMetricsDelta> = Vec::new();
    let mut declining: Vec<&StoreMetricsDelta> = Vec::new();

    for delta in deltas {
        let deciding = if delta.revenue_change_rate != 0.0 {
            delta.revenue_change_rate
        } else {
            delta.profit_change_rate
        };
        if deciding < 0.0 {
            declining.push(delta);
        } else {
            growing.push(delta);
        }
    }

    TrendSection {
        growing_count: growing.len(),
        declining_count: declining.len(),
        top_growing: top_movers(&growing),
        top_declining: top_movers(&declining),
        summary: String::new(),
    }
}

/// The bucket's three largest movers by |revenue change|, names breaking ties.
fn top_movers(bucket: &[&StoreMetricsDelta]) -> Vec<TrendHighlight> {
    let mut ranked: Vec<&&StoreMetricsDelta> = bucket.iter().collect();
    ranked.sort_by(|a, b| {
        b.revenue_change_rate
            .abs()
            .partial_cmp(&a.revenue_change_rate.abs())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.store_name.cmp(&b.store_name))
    });
    ranked
        .iter()
        .take(3)
        .map(|d| TrendHighlight {
            store_name: d.store_name.clone(),
            revenue_change_rate: d.revenue_change_rate,
            profit_change_rate: d.profit_change_rate,
        })
        .collect()
}
