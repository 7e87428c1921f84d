//! Templated natural-language section summaries.
//!
//! Pure functions from a section's numbers to one of a fixed set of message
//! templates, selected by threshold bands. The text is advisory only —
//! nothing downstream consumes it.

use crate::types::{
    AnomalySection, AttributionSection, ClusterSection, CostSection, HeadTailSection,
    HealthSection, OverviewSection, TrendSection,
};

/// Weighted margin at or above this reads as a healthy fleet.
const MARGIN_HEALTHY: f64 = 25.0;
/// Weighted margin at or above this (but below healthy) reads as average.
const MARGIN_AVERAGE: f64 = 15.0;

pub fn overview(section: &OverviewSection) -> String {
    if section.store_count == 0 {
        return "No stores in the selected range; nothing to analyze.".into();
    }
    let band = if section.weighted_profit_margin >= MARGIN_HEALTHY {
        "healthy"
    } else if section.weighted_profit_margin >= MARGIN_AVERAGE {
        "average"
    } else {
        "in need of attention"
    };
    format!(
        "{} stores produced {:.0} orders and a weighted profit margin of {:.1}% — {}.",
        section.store_count, section.total_orders as f64, section.weighted_profit_margin, band
    )
}

pub fn clusters(section: &ClusterSection) -> String {
    let high = &section.high_performance;
    let low = &section.low_performance;
    if high.count + section.medium_performance.count + low.count == 0 {
        return "No stores to cluster.".into();
    }
    if low.count == 0 {
        format!(
            "{} stores ({:.0}%) sit in the high tier and no store falls below the 25th percentile.",
            high.count, high.percentage
        )
    } else {
        format!(
            "{} stores ({:.0}%) lead the fleet while {} ({:.0}%) lag below the 25th percentile.",
            high.count, high.percentage, low.count, low.percentage
        )
    }
}

pub fn anomalies(section: &AnomalySection) -> String {
    match section.total_anomaly_stores {
        0 => "No outlier stores detected.".into(),
        1 => "1 store shows outlier behavior; review its flagged metrics.".into(),
        n => format!(
            "{} stores show outlier behavior across {} categories; triage the high-severity flags first.",
            n,
            [
                !section.profit_margin.is_empty(),
                !section.order_count.is_empty(),
                !section.high_marketing.is_empty(),
                !section.high_delivery.is_empty(),
            ]
            .iter()
            .filter(|&&present| present)
            .count()
        ),
    }
}

pub fn head_tail(section: &HeadTailSection) -> String {
    if section.bottom.is_empty() {
        return "Too few stores for a head/tail contrast.".into();
    }
    let gap = section.gaps.profit_margin;
    let band = if gap >= 20.0 {
        "a wide spread worth structural attention"
    } else if gap >= 10.0 {
        "a moderate spread"
    } else {
        "a tight spread"
    };
    format!(
        "Top stores out-earn the tail by {:.1} margin points — {}.",
        gap, band
    )
}

pub fn attribution(section: &AttributionSection) -> String {
    let r = section.primary_coefficient;
    let strength = if r.abs() >= 0.7 {
        "strongly"
    } else if r.abs() >= 0.4 {
        "moderately"
    } else {
        "only weakly"
    };
    format!(
        "Profit margin correlates {} with {} (r = {:.2}).",
        strength, section.primary_factor, r
    )
}

pub fn trend(section: &TrendSection) -> String {
    let total = section.growing_count + section.declining_count;
    if total == 0 {
        return "No paired-period data; trend analysis skipped.".into();
    }
    let growing_share = section.growing_count as f64 / total as f64 * 100.0;
    if growing_share >= 60.0 {
        format!(
            "Momentum is positive: {} of {} stores are growing period over period.",
            section.growing_count, total
        )
    } else if growing_share >= 40.0 {
        format!(
            "The fleet is split: {} growing, {} declining.",
            section.growing_count, section.declining_count
        )
    } else {
        format!(
            "Momentum is negative: {} of {} stores are declining period over period.",
            section.declining_count, total
        )
    }
}

pub fn health(section: &HealthSection) -> String {
    if section.scores.is_empty() {
        return "No stores to score.".into();
    }
    let band = if section.average_score >= 80.0 {
        "excellent"
    } else if section.average_score >= 60.0 {
        "good"
    } else if section.average_score >= 40.0 {
        "average"
    } else {
        "poor"
    };
    format!(
        "Average fleet health is {:.1}/100 ({}); {} stores rate poor.",
        section.average_score, band, section.distribution.poor
    )
}

pub fn cost_structure(section: &CostSection) -> String {
    let combined = section.overall_marketing_rate + section.overall_delivery_rate;
    if combined == 0.0 {
        return "No cost data in the selected range.".into();
    }
    let band = if combined >= 35.0 {
        "heavy enough to dominate unit economics"
    } else if combined >= 20.0 {
        "material but manageable"
    } else {
        "lean"
    };
    format!(
        "Marketing and delivery absorb {:.1}% of revenue combined — {}.",
        combined, band
    )
}
