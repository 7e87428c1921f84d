use std::fmt;

use serde::Serialize;
use storelens_stats::Summary;

use crate::error::{EngineError, EngineResult};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// One store's business metrics for a fixed date range and channel scope.
///
/// Constructed only through [`StoreMetrics::new`], which validates the raw
/// fields and recomputes `profit_margin` from totals — the margin supplied by
/// an upstream query is never trusted. Immutable once built; each analysis
/// call owns its own collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StoreMetrics {
    pub store_name: String,
    pub order_count: u64,
    pub total_revenue: f64,
    pub total_profit: f64,
    /// `total_profit / total_revenue × 100`, recomputed at construction.
    pub profit_margin: f64,
    /// Average order value.
    pub aov: f64,
    /// Marketing spend as a percentage of revenue.
    pub marketing_cost_rate: f64,
    /// Delivery cost as a percentage of revenue.
    pub delivery_cost_rate: f64,
}

impl StoreMetrics {
    /// Validate raw per-store fields and build an immutable record.
    ///
    /// Rejections fail the whole analysis call: a negative order count, a
    /// non-finite numeric field, or zero revenue paired with non-zero profit
    /// (the margin would be undefined, and silently reporting 0 for that
    /// store would mislead every downstream section).
    pub fn new(
        store_name: impl Into<String>,
        order_count: i64,
        total_revenue: f64,
        total_profit: f64,
        aov: f64,
        marketing_cost_rate: f64,
        delivery_cost_rate: f64,
    ) -> EngineResult<Self> {
        let store_name = store_name.into();

        if order_count < 0 {
            return Err(EngineError::NegativeOrderCount { store: store_name });
        }
        for (field, value) in [
            ("total_revenue", total_revenue),
            ("total_profit", total_profit),
            ("aov", aov),
            ("marketing_cost_rate", marketing_cost_rate),
            ("delivery_cost_rate", delivery_cost_rate),
        ] {
            if !value.is_finite() {
                return Err(EngineError::NonFiniteField {
                    store: store_name,
                    field,
                });
            }
        }
        if total_revenue == 0.0 && total_profit != 0.0 {
            return Err(EngineError::ProfitWithoutRevenue { store: store_name });
        }

        let profit_margin = if total_revenue > 0.0 {
            total_profit / total_revenue * 100.0
        } else {
            0.0
        };

        Ok(Self {
            store_name,
            order_count: order_count as u64,
            total_revenue,
            total_profit,
            profit_margin,
            aov,
            marketing_cost_rate,
            delivery_cost_rate,
        })
    }

    /// Re-run the construction-time validation on an existing record.
    ///
    /// The orchestrator calls this at its entry point so a record assembled
    /// by hand (struct literal in a test, a future deserialization path)
    /// cannot smuggle invalid data past the boundary.
    pub fn validate(&self) -> EngineResult<()> {
        Self::new(
            self.store_name.clone(),
            self.order_count as i64,
            self.total_revenue,
            self.total_profit,
            self.aov,
            self.marketing_cost_rate,
            self.delivery_cost_rate,
        )
        .map(|_| ())
    }
}

/// A current/previous metrics pair with derived change rates.
///
/// Count and currency fields carry percentage change; fields that are already
/// percentages (margin and the two cost rates) carry percentage-point change.
#[derive(Clone, Debug, Serialize)]
pub struct StoreMetricsDelta {
    pub store_name: String,
    pub current: StoreMetrics,
    pub previous: StoreMetrics,
    pub revenue_change_rate: f64,
    pub profit_change_rate: f64,
    pub order_change_rate: f64,
    pub aov_change_rate: f64,
    pub margin_change_pp: f64,
    pub marketing_rate_change_pp: f64,
    pub delivery_rate_change_pp: f64,
}

impl StoreMetricsDelta {
    /// Pair two periods of the same store and derive its change rates.
    pub fn new(current: StoreMetrics, previous: StoreMetrics) -> Self {
        Self {
            store_name: current.store_name.clone(),
            revenue_change_rate: pct_change(current.total_revenue, previous.total_revenue),
            profit_change_rate: pct_change(current.total_profit, previous.total_profit),
            order_change_rate: pct_change(current.order_count as f64, previous.order_count as f64),
            aov_change_rate: pct_change(current.aov, previous.aov),
            margin_change_pp: current.profit_margin - previous.profit_margin,
            marketing_rate_change_pp: current.marketing_cost_rate - previous.marketing_cost_rate,
            delivery_rate_change_pp: current.delivery_cost_rate - previous.delivery_cost_rate,
            current,
            previous,
        }
    }
}

/// Percentage change from `prev` to `cur`.
///
/// The denominator is |prev| so the sign always matches the direction of
/// movement even when the base is negative (a loss shrinking toward zero is
/// positive change). A zero base yields 0.
fn pct_change(cur: f64, prev: f64) -> f64 {
    if prev == 0.0 {
        0.0
    } else {
        (cur - prev) / prev.abs() * 100.0
    }
}

// ---------------------------------------------------------------------------
// Severity and priority
// ---------------------------------------------------------------------------

/// How far outside normal a flagged store sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// Recommendation priority bucket. Ordering is urgency-first so sorting a
/// recommendation list puts urgent items on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    Important,
    General,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Urgent => write!(f, "urgent"),
            Priority::Important => write!(f, "important"),
            Priority::General => write!(f, "general"),
        }
    }
}

// ---------------------------------------------------------------------------
// Section types
// ---------------------------------------------------------------------------

/// One store flagged by one anomaly sub-detector. Never mutated after
/// creation; a store may appear in several categories.
#[derive(Clone, Debug, Serialize)]
pub struct AnomalyRecord {
    pub store_name: String,
    /// The metric value that triggered the flag.
    pub value: f64,
    /// The threshold or bound that was crossed.
    pub threshold: f64,
    pub severity: Severity,
    pub message: String,
}

/// Anomaly findings grouped by detector category.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AnomalySection {
    /// Z-score outliers on profit margin.
    pub profit_margin: Vec<AnomalyRecord>,
    /// IQR outliers on order count.
    pub order_count: Vec<AnomalyRecord>,
    /// Stores above the marketing cost rate threshold.
    pub high_marketing: Vec<AnomalyRecord>,
    /// Stores above the delivery cost rate threshold.
    pub high_delivery: Vec<AnomalyRecord>,
    /// Distinct store names across all categories.
    pub total_anomaly_stores: usize,
    pub summary: String,
}

/// Aggregate metrics of one performance cluster's members.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ClusterAverages {
    pub avg_order_count: f64,
    pub avg_revenue: f64,
    pub avg_profit: f64,
    /// Weighted: summed profit over summed revenue, not a mean of margins.
    pub avg_profit_margin: f64,
    pub avg_aov: f64,
    pub avg_marketing_cost_rate: f64,
    pub avg_delivery_cost_rate: f64,
}

/// One performance tier. All three tiers are always present in the report,
/// possibly empty.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ClusterGroup {
    pub count: usize,
    /// Share of all stores, in percent.
    pub percentage: f64,
    pub avg_metrics: ClusterAverages,
    /// Up to three members with the highest revenue.
    pub top_stores: Vec<String>,
    /// Every member, for downstream consumers.
    pub members: Vec<String>,
    pub characteristics: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ClusterSection {
    pub high_performance: ClusterGroup,
    pub medium_performance: ClusterGroup,
    pub low_performance: ClusterGroup,
    pub summary: String,
}

/// A store's key numbers as shown in the head/tail comparison.
#[derive(Clone, Debug, Serialize)]
pub struct StoreSnapshot {
    pub store_name: String,
    pub profit_margin: f64,
    pub total_revenue: f64,
    pub aov: f64,
}

/// Average(top) − average(bottom) per compared field; all zero when the
/// bottom set is empty.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MetricGaps {
    pub profit_margin: f64,
    pub aov: f64,
    pub marketing_cost_rate: f64,
    pub delivery_cost_rate: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct HeadTailSection {
    pub top: Vec<StoreSnapshot>,
    pub bottom: Vec<StoreSnapshot>,
    pub gaps: MetricGaps,
    pub summary: String,
}

/// Candidate profitability drivers, in declaration order — the order breaks
/// primary-factor ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverFactor {
    Aov,
    MarketingCostRate,
    DeliveryCostRate,
}

impl fmt::Display for DriverFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverFactor::Aov => write!(f, "average order value"),
            DriverFactor::MarketingCostRate => write!(f, "marketing cost rate"),
            DriverFactor::DeliveryCostRate => write!(f, "delivery cost rate"),
        }
    }
}

/// Pearson correlation of one driver against profit margin.
#[derive(Clone, Debug, Serialize)]
pub struct FactorCorrelation {
    pub factor: DriverFactor,
    pub coefficient: f64,
    /// True when the coefficient was forced to 0 by zero variance.
    pub low_confidence: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct AttributionSection {
    pub factors: Vec<FactorCorrelation>,
    pub primary_factor: DriverFactor,
    pub primary_coefficient: f64,
    pub summary: String,
}

/// One store in a trend bucket's top-3 list.
#[derive(Clone, Debug, Serialize)]
pub struct TrendHighlight {
    pub store_name: String,
    pub revenue_change_rate: f64,
    pub profit_change_rate: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct TrendSection {
    pub growing_count: usize,
    pub declining_count: usize,
    pub top_growing: Vec<TrendHighlight>,
    pub top_declining: Vec<TrendHighlight>,
    pub summary: String,
}

/// Composite 0–100 health score with its four sub-scores.
#[derive(Clone, Debug, Serialize)]
pub struct HealthScore {
    pub store_name: String,
    pub health_score: f64,
    /// Profit margin sub-score.
    pub pm_score: f64,
    /// Order count sub-score.
    pub oc_score: f64,
    /// Marketing cost sub-score (higher rate → lower score).
    pub mc_score: f64,
    /// Delivery cost sub-score (higher rate → lower score).
    pub dc_score: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct HealthDistribution {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub poor: usize,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct HealthSection {
    /// Best first: score descending, name ascending on ties.
    pub scores: Vec<HealthScore>,
    pub average_score: f64,
    pub distribution: HealthDistribution,
    pub summary: String,
}

/// Mean cost rates of the high vs low performance clusters.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ClusterRateComparison {
    pub high_marketing_rate: f64,
    pub high_delivery_rate: f64,
    pub low_marketing_rate: f64,
    pub low_delivery_rate: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CostSection {
    /// Absolute marketing spend, derived from each store's rate × revenue.
    pub total_marketing_cost: f64,
    pub total_delivery_cost: f64,
    /// Weighted: summed cost over summed revenue.
    pub overall_marketing_rate: f64,
    pub overall_delivery_rate: f64,
    pub marketing_rate_stats: Summary,
    pub delivery_rate_stats: Summary,
    pub high_marketing_stores: Vec<String>,
    pub high_delivery_stores: Vec<String>,
    pub cluster_comparison: ClusterRateComparison,
    pub summary: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct OverviewSection {
    pub store_count: usize,
    pub total_orders: u64,
    pub total_revenue: f64,
    pub total_profit: f64,
    /// Weighted: summed profit over summed revenue.
    pub weighted_profit_margin: f64,
    pub average_aov: f64,
    pub margin_stats: Summary,
    pub revenue_stats: Summary,
    pub summary: String,
}

/// One prioritized, actionable recommendation.
#[derive(Clone, Debug, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
    pub affected_stores: Vec<String>,
}

/// The full diagnostic report. Built fresh per call, serialized by the
/// surrounding API layer, and dropped — nothing here persists.
#[derive(Clone, Debug, Serialize)]
pub struct InsightsReport {
    pub generated_at: String,
    pub overview: OverviewSection,
    pub clusters: ClusterSection,
    pub anomalies: AnomalySection,
    pub head_tail: HeadTailSection,
    pub attribution: AttributionSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendSection>,
    pub health: HealthSection,
    pub cost_structure: CostSection,
    pub recommendations: Vec<Recommendation>,
}
