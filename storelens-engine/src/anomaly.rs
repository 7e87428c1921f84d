//! Outlier detection across three independent sub-detectors.
//!
//! Z-score on profit margin, IQR fences on order count, and fixed cost-rate
//! thresholds. Results are unioned by category — a store can appear in more
//! than one category, and `total_anomaly_stores` counts distinct names.

use std::collections::BTreeSet;

use storelens_stats::describe;

use crate::thresholds::AnalysisConfig;
use crate::types::{AnomalyRecord, AnomalySection, Severity, StoreMetrics};

/// Run all three sub-detectors over the dataset.
///
/// A fleet with zero margin variance produces no z-score flags (z is defined
/// as 0 when std is 0), and an empty dataset produces an empty section —
/// neither is an error.
pub fn detect(stores: &[StoreMetrics], config: &AnalysisConfig) -> AnomalySection {
    let profit_margin = detect_margin_outliers(stores, config);
    let order_count = detect_order_outliers(stores, config);
    let high_marketing = detect_rate_outliers(
        stores,
        |s| s.marketing_cost_rate,
        "marketing cost rate",
        config.marketing_alert_rate,
        config.marketing_severe_rate,
    );
    let high_delivery = detect_rate_outliers(
        stores,
        |s| s.delivery_cost_rate,
        "delivery cost rate",
        config.delivery_alert_rate,
        config.delivery_severe_rate,
    );

    let distinct: BTreeSet<&str> = profit_margin
        .iter()
        .chain(&order_count)
        .chain(&high_marketing)
        .chain(&high_delivery)
        .map(|r| r.store_name.as_str())
        .collect();
    let total_anomaly_stores = distinct.len();

    AnomalySection {
        profit_margin,
        order_count,
        high_marketing,
        high_delivery,
        total_anomaly_stores,
        summary: String::new(),
    }
}

/// Z-score sub-detector on profit margin.
fn detect_margin_outliers(stores: &[StoreMetrics], config: &AnalysisConfig) -> Vec<AnomalyRecord> {
    let margins: Vec<f64> = stores.iter().map(|s| s.profit_margin).collect();
    let stats = describe(&margins);
    if stats.std == 0.0 {
        return Vec::new();
    }

    stores
        .iter()
        .filter_map(|store| {
            let z = (store.profit_margin - stats.mean) / stats.std;
            if z.abs() <= config.z_score_flag {
                return None;
            }
            let (severity, band) = if z.abs() > config.z_score_severe {
                (Severity::High, config.z_score_severe)
            } else {
                (Severity::Medium, config.z_score_flag)
            };
            let direction = if z > 0.0 { "above" } else { "below" };
            Some(AnomalyRecord {
                store_name: store.store_name.clone(),
                value: store.profit_margin,
                threshold: band,
                severity,
                message: format!(
                    "{}: profit margin {:.1}% sits {:.1} standard deviations {} the fleet mean (|z| > {:.1})",
                    store.store_name,
                    store.profit_margin,
                    z.abs(),
                    direction,
                    band
                ),
            })
        })
        .collect()
}

/// IQR sub-detector on order count (Tukey fences).
fn detect_order_outliers(stores: &[StoreMetrics], config: &AnalysisConfig) -> Vec<AnomalyRecord> {
    if stores.is_empty() {
        return Vec::new();
    }
    let counts: Vec<f64> = stores.iter().map(|s| s.order_count as f64).collect();
    let stats = describe(&counts);
    let iqr = stats.p75 - stats.p25;
    let lower = stats.p25 - config.iqr_multiplier * iqr;
    let upper = stats.p75 + config.iqr_multiplier * iqr;

    stores
        .iter()
        .filter_map(|store| {
            let count = store.order_count as f64;
            let (bound, relation) = if count < lower {
                (lower, "below the lower")
            } else if count > upper {
                (upper, "above the upper")
            } else {
                return None;
            };
            Some(AnomalyRecord {
                store_name: store.store_name.clone(),
                value: count,
                threshold: bound,
                severity: Severity::Medium,
                message: format!(
                    "{}: order count {} is {} IQR bound ({:.1})",
                    store.store_name, store.order_count, relation, bound
                ),
            })
        })
        .collect()
}

/// Fixed-threshold sub-detector for a cost rate field.
fn detect_rate_outliers(
    stores: &[StoreMetrics],
    rate: impl Fn(&StoreMetrics) -> f64,
    label: &str,
    alert: f64,
    severe: f64,
) -> Vec<AnomalyRecord> {
    stores
        .iter()
        .filter_map(|store| {
            let value = rate(store);
            if value <= alert {
                return None;
            }
            let severity = if value > severe {
                Severity::High
            } else {
                Severity::Medium
            };
            Some(AnomalyRecord {
                store_name: store.store_name.clone(),
                value,
                threshold: alert,
                severity,
                message: format!(
                    "{}: {} {:.1}% exceeds the {:.0}% threshold",
                    store.store_name, label, value, alert
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str, orders: i64, margin_profit_on_1000: f64) -> StoreMetrics {
        StoreMetrics::new(
            name,
            orders,
            1000.0,
            margin_profit_on_1000 * 10.0,
            40.0,
            10.0,
            12.0,
        )
        .unwrap()
    }

    fn store_with_rates(name: &str, marketing: f64, delivery: f64) -> StoreMetrics {
        StoreMetrics::new(name, 100, 1000.0, 200.0, 40.0, marketing, delivery).unwrap()
    }

    #[test]
    fn zero_margin_variance_produces_no_z_flags() {
        let stores: Vec<StoreMetrics> = (0..5)
            .map(|i| store(&format!("s{}", i), 100, 20.0))
            .collect();
        let section = detect(&stores, &AnalysisConfig::default());
        assert!(section.profit_margin.is_empty());
    }

    #[test]
    fn single_store_produces_no_z_flags() {
        // std = 0 with one store, so z is defined as 0.
        let stores = vec![store("Solo", 100, 30.0)];
        let section = detect(&stores, &AnalysisConfig::default());
        assert!(section.profit_margin.is_empty());
    }

    #[test]
    fn extreme_margin_is_flagged_by_z_score() {
        // Ten stores at 20% and one at 60%. One outlier among k identical
        // values scores z = sqrt(k), so k = 10 gives |z| ≈ 3.16 > 3.
        let mut stores: Vec<StoreMetrics> = (0..10)
            .map(|i| store(&format!("s{}", i), 100, 20.0))
            .collect();
        stores.push(store("Spike", 100, 60.0));
        let section = detect(&stores, &AnalysisConfig::default());
        assert_eq!(section.profit_margin.len(), 1);
        let record = &section.profit_margin[0];
        assert_eq!(record.store_name, "Spike");
        assert_eq!(record.severity, Severity::High);
        assert!((record.value - 60.0).abs() < 1e-9);
        assert!(record.message.contains("Spike"));
        assert!(record.message.contains("profit margin"));
    }

    #[test]
    fn order_count_outlier_outside_iqr_fence() {
        // Counts 100..109 plus one store at 10000: far above Q3 + 1.5·IQR.
        let mut stores: Vec<StoreMetrics> = (0..10)
            .map(|i| store(&format!("s{}", i), 100 + i, 20.0))
            .collect();
        stores.push(store("Whale", 10_000, 20.0));
        let section = detect(&stores, &AnalysisConfig::default());
        assert_eq!(section.order_count.len(), 1);
        let record = &section.order_count[0];
        assert_eq!(record.store_name, "Whale");
        assert_eq!(record.severity, Severity::Medium);
        assert_eq!(record.value, 10_000.0);
        assert!(record.value > record.threshold);
    }

    #[test]
    fn cost_rate_thresholds_grade_severity() {
        let stores = vec![
            store_with_rates("Lean", 10.0, 15.0),
            store_with_rates("Heavy", 20.0, 25.0),
            store_with_rates("Burning", 30.0, 35.0),
        ];
        let section = detect(&stores, &AnalysisConfig::default());

        // marketing: 20 > 15 (medium), 30 > 25 (high)
        assert_eq!(section.high_marketing.len(), 2);
        assert_eq!(section.high_marketing[0].store_name, "Heavy");
        assert_eq!(section.high_marketing[0].severity, Severity::Medium);
        assert_eq!(section.high_marketing[1].store_name, "Burning");
        assert_eq!(section.high_marketing[1].severity, Severity::High);

        // delivery: 25 > 20 (medium), 35 > 30 (high)
        assert_eq!(section.high_delivery.len(), 2);
        assert_eq!(section.high_delivery[1].severity, Severity::High);
    }

    #[test]
    fn exact_threshold_is_not_flagged() {
        let stores = vec![store_with_rates("Edge", 15.0, 20.0)];
        let section = detect(&stores, &AnalysisConfig::default());
        assert!(section.high_marketing.is_empty());
        assert!(section.high_delivery.is_empty());
    }

    #[test]
    fn distinct_store_count_spans_categories() {
        // "Burning" triggers both marketing and delivery; it counts once.
        let stores = vec![
            store_with_rates("Calm", 5.0, 8.0),
            store_with_rates("Burning", 30.0, 35.0),
        ];
        let section = detect(&stores, &AnalysisConfig::default());
        assert_eq!(section.high_marketing.len(), 1);
        assert_eq!(section.high_delivery.len(), 1);
        assert_eq!(section.total_anomaly_stores, 1);
    }

    #[test]
    fn empty_input_is_an_empty_section() {
        let section = detect(&[], &AnalysisConfig::default());
        assert!(section.profit_margin.is_empty());
        assert!(section.order_count.is_empty());
        assert!(section.high_marketing.is_empty());
        assert!(section.high_delivery.is_empty());
        assert_eq!(section.total_anomaly_stores, 0);
    }

    #[test]
    fn alternate_config_moves_the_bands() {
        let stores = vec![
            store_with_rates("A", 12.0, 10.0),
            store_with_rates("B", 5.0, 10.0),
        ];
        let config = AnalysisConfig {
            marketing_alert_rate: 10.0,
            ..AnalysisConfig::default()
        };
        let section = detect(&stores, &config);
        assert_eq!(section.high_marketing.len(), 1);
        assert_eq!(section.high_marketing[0].store_name, "A");
    }
}
