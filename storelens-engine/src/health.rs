//! Composite store health scoring.
//!
//! Four sub-scores on a 0–100 scale, each normalized against the fleet's
//! p5–p95 percentile range, combined with fixed weights: profit margin 0.4,
//! order volume 0.2, marketing cost 0.2, delivery cost 0.2. The two cost
//! sub-scores invert their metric — a higher rate scores lower. With fewer
//! than two stores (or a collapsed percentile range) normalization
//! degenerates to a constant mid-score of 50.

use std::cmp::Ordering;

use storelens_stats::PercentileScale;

use crate::thresholds::{
    HEALTH_WEIGHT_DELIVERY, HEALTH_WEIGHT_MARGIN, HEALTH_WEIGHT_MARKETING, HEALTH_WEIGHT_ORDERS,
};
use crate::types::{HealthDistribution, HealthScore, HealthSection, StoreMetrics};

/// Score every store and summarize the fleet's health distribution.
pub fn score(stores: &[StoreMetrics]) -> HealthSection {
    let margin_scale = fit(stores, |s| s.profit_margin);
    let order_scale = fit(stores, |s| s.order_count as f64);
    let marketing_scale = fit(stores, |s| s.marketing_cost_rate);
    let delivery_scale = fit(stores, |s| s.delivery_cost_rate);

    let mut scores: Vec<HealthScore> = stores
        .iter()
        .map(|store| {
            let pm_score = margin_scale.apply(store.profit_margin);
            let oc_score = order_scale.apply(store.order_count as f64);
            let mc_score = 100.0 - marketing_scale.apply(store.marketing_cost_rate);
            let dc_score = 100.0 - delivery_scale.apply(store.delivery_cost_rate);
            let composite = HEALTH_WEIGHT_MARGIN * pm_score
                + HEALTH_WEIGHT_ORDERS * oc_score
                + HEALTH_WEIGHT_MARKETING * mc_score
                + HEALTH_WEIGHT_DELIVERY * dc_score;
            HealthScore {
                store_name: store.store_name.clone(),
                health_score: round1(composite),
                pm_score: round1(pm_score),
                oc_score: round1(oc_score),
                mc_score: round1(mc_score),
                dc_score: round1(dc_score),
            }
        })
        .collect();

    scores.sort_by(|a, b| {
        b.health_score
            .partial_cmp(&a.health_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.store_name.cmp(&b.store_name))
    });

    let average_score = if scores.is_empty() {
        0.0
    } else {
        round1(scores.iter().map(|s| s.health_score).sum::<f64>() / scores.len() as f64)
    };

    let mut distribution = HealthDistribution::default();
    for s in &scores {
        if s.health_score >= 80.0 {
            distribution.excellent += 1;
        } else if s.health_score >= 60.0 {
            distribution.good += 1;
        } else if s.health_score >= 40.0 {
            distribution.average += 1;
        } else {
            distribution.poor += 1;
        }
    }

    HealthSection {
        scores,
        average_score,
        distribution,
        summary: String::new(),
    }
}

fn fit(stores: &[StoreMetrics], field: impl Fn(&StoreMetrics) -> f64) -> PercentileScale {
    let values: Vec<f64> = stores.iter().map(field).collect();
    PercentileScale::fit(&values)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(
        name: &str,
        orders: i64,
        profit: f64,
        marketing: f64,
        delivery: f64,
    ) -> StoreMetrics {
        StoreMetrics::new(name, orders, 1000.0, profit, 40.0, marketing, delivery).unwrap()
    }

    fn spread_fleet() -> Vec<StoreMetrics> {
        (0..20)
            .map(|i| {
                store(
                    &format!("store-{:02}", i),
                    50 + i * 20,
                    50.0 + i as f64 * 15.0,
                    5.0 + i as f64,
                    8.0 + i as f64,
                )
            })
            .collect()
    }

    #[test]
    fn scores_stay_in_range() {
        let section = score(&spread_fleet());
        for s in &section.scores {
            assert!(
                (0.0..=100.0).contains(&s.health_score),
                "{} scored {}",
                s.store_name,
                s.health_score
            );
            for sub in [s.pm_score, s.oc_score, s.mc_score, s.dc_score] {
                assert!((0.0..=100.0).contains(&sub));
            }
        }
    }

    #[test]
    fn cost_sub_scores_invert_their_metric() {
        let section = score(&spread_fleet());
        // store-00 has the lowest cost rates in the fleet, so its cost
        // sub-scores are the highest.
        let cheapest = section
            .scores
            .iter()
            .find(|s| s.store_name == "store-00")
            .unwrap();
        let priciest = section
            .scores
            .iter()
            .find(|s| s.store_name == "store-19")
            .unwrap();
        assert!(cheapest.mc_score > priciest.mc_score);
        assert!(cheapest.dc_score > priciest.dc_score);
    }

    #[test]
    fn single_store_degenerates_to_mid_scores() {
        let section = score(&[store("Solo", 100, 300.0, 10.0, 12.0)]);
        let s = &section.scores[0];
        assert_eq!(s.pm_score, 50.0);
        assert_eq!(s.oc_score, 50.0);
        assert_eq!(s.mc_score, 50.0);
        assert_eq!(s.dc_score, 50.0);
        // 0.4·50 + 0.2·50 + 0.2·50 + 0.2·50 = 50
        assert_eq!(s.health_score, 50.0);
        assert_eq!(section.distribution.average, 1);
    }

    #[test]
    fn identical_stores_all_score_mid() {
        let stores: Vec<StoreMetrics> = (0..5)
            .map(|i| store(&format!("s{}", i), 100, 300.0, 10.0, 12.0))
            .collect();
        let section = score(&stores);
        assert!(section.scores.iter().all(|s| s.health_score == 50.0));
    }

    #[test]
    fn composite_uses_the_documented_weights() {
        // Wide fleet so p5/p95 are far apart; check one store's arithmetic.
        let section = score(&spread_fleet());
        for s in &section.scores {
            let expected = 0.4 * s.pm_score + 0.2 * s.oc_score + 0.2 * s.mc_score + 0.2 * s.dc_score;
            // Sub-scores are rounded for display after the composite is
            // computed, so allow a rounding-width tolerance.
            assert!(
                (s.health_score - expected).abs() < 0.3,
                "{}: {} vs {}",
                s.store_name,
                s.health_score,
                expected
            );
        }
    }

    #[test]
    fn scores_sorted_best_first() {
        let section = score(&spread_fleet());
        for pair in section.scores.windows(2) {
            assert!(pair[0].health_score >= pair[1].health_score);
        }
    }

    #[test]
    fn distribution_counts_every_store_once() {
        let section = score(&spread_fleet());
        let d = &section.distribution;
        assert_eq!(d.excellent + d.good + d.average + d.poor, 20);
    }

    #[test]
    fn empty_input_is_an_empty_section() {
        let section = score(&[]);
        assert!(section.scores.is_empty());
        assert_eq!(section.average_score, 0.0);
        assert_eq!(section.distribution.excellent, 0);
    }
}
