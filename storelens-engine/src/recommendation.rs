//! Prioritized recommendation synthesis.
//!
//! A deterministic rule set over the outputs of the other analyzers:
//! high-severity anomaly categories become urgent recommendations (one per
//! category, not per store), a populated low-performance cluster becomes an
//! important one, and a strong profitability driver becomes a general one.
//! Buckets are ordered urgent → important → general; within a bucket the
//! category touching the most stores comes first, ties by category name.

use crate::thresholds::AnalysisConfig;
use crate::types::{
    AnomalyRecord, AnomalySection, AttributionSection, ClusterSection, DriverFactor, Priority,
    Recommendation, Severity,
};

/// Synthesize the recommendation list from the analysis sections.
pub fn generate(
    anomalies: &AnomalySection,
    clusters: &ClusterSection,
    attribution: &AttributionSection,
    config: &AnalysisConfig,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for (category, records) in [
        ("profit-margin", &anomalies.profit_margin),
        ("order-volume", &anomalies.order_count),
        ("marketing-cost", &anomalies.high_marketing),
        ("delivery-cost", &anomalies.high_delivery),
    ] {
        if records.iter().any(|r| r.severity == Severity::High) {
            recommendations.push(urgent_for_category(category, records));
        }
    }

    let low = &clusters.low_performance;
    if low.count > 0 {
        let mut affected = low.members.clone();
        affected.sort();
        recommendations.push(Recommendation {
            priority: Priority::Important,
            category: "cluster-strategy".into(),
            title: "Lift the low-performance cluster".into(),
            description: format!(
                "{} stores ({:.0}% of the fleet) sit in the low-performance tier: {}.",
                low.count, low.percentage, low.characteristics
            ),
            action_items: vec![
                "Pair each low-tier store with a top-quartile mentor store".into(),
                "Replicate high-tier pricing and cost controls in the low tier".into(),
                "Review local market fit for stores that stay in the tier".into(),
            ],
            affected_stores: affected,
        });
    }

    if attribution.primary_coefficient.abs() >= config.primary_factor_floor {
        recommendations.push(driver_recommendation(attribution));
    }

    // Urgent first; inside a bucket, widest reach first, then category name.
    recommendations.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.affected_stores.len().cmp(&a.affected_stores.len()))
            .then_with(|| a.category.cmp(&b.category))
    });

    recommendations
}

/// One urgent recommendation covering a whole anomaly category.
fn urgent_for_category(category: &str, records: &[AnomalyRecord]) -> Recommendation {
    let high_count = records
        .iter()
        .filter(|r| r.severity == Severity::High)
        .count();

    // High-severity stores lead the list; names break ties.
    let mut ranked: Vec<&AnomalyRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.store_name.cmp(&b.store_name))
    });
    let mut affected: Vec<String> = ranked.iter().map(|r| r.store_name.clone()).collect();
    affected.dedup();

    let (title, action_items) = match category {
        "marketing-cost" => (
            "Rein in runaway marketing spend",
            vec![
                "Audit channel-level ad spend for the flagged stores".to_string(),
                "Pause the lowest-converting campaigns pending review".to_string(),
                "Cap per-store marketing budgets at the alert threshold".to_string(),
            ],
        ),
        "delivery-cost" => (
            "Restructure delivery economics",
            vec![
                "Re-tender courier contracts for the flagged stores".to_string(),
                "Revisit delivery radius and minimum order values".to_string(),
                "Batch marginal orders into shared delivery windows".to_string(),
            ],
        ),
        "profit-margin" => (
            "Investigate extreme margin outliers",
            vec![
                "Verify cost allocation and pricing data for the flagged stores".to_string(),
                "Compare each outlier against its cluster peers".to_string(),
            ],
        ),
        _ => (
            "Investigate order volume outliers",
            vec!["Check the flagged stores for data or demand anomalies".to_string()],
        ),
    };

    Recommendation {
        priority: Priority::Urgent,
        category: category.into(),
        title: title.into(),
        description: format!(
            "{} of {} flagged stores in the {} category are high severity.",
            high_count,
            affected.len(),
            category
        ),
        action_items,
        affected_stores: affected,
    }
}

fn driver_recommendation(attribution: &AttributionSection) -> Recommendation {
    let factor = attribution.primary_factor;
    let direction = if attribution.primary_coefficient >= 0.0 {
        "rises"
    } else {
        "falls"
    };
    let action = match factor {
        DriverFactor::Aov => "Test basket-building promotions and bundle pricing".to_string(),
        DriverFactor::MarketingCostRate => {
            "Rebalance marketing spend toward the stores where it converts".to_string()
        }
        DriverFactor::DeliveryCostRate => {
            "Prioritize delivery cost reduction in the worst-margin stores".to_string()
        }
    };

    Recommendation {
        priority: Priority::General,
        category: "profitability-driver".into(),
        title: format!("Profitability tracks {}", factor),
        description: format!(
            "Profit margin {} with {} across the fleet (Pearson r = {:.2}).",
            direction, factor, attribution.primary_coefficient
        ),
        action_items: vec![
            action,
            "Re-run the correlation after the next period to confirm the lever".to_string(),
        ],
        affected_stores: Vec::new(),
    }
}
