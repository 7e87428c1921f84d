//! Profitability attribution via Pearson correlation.
//!
//! Correlates profit margin against each candidate driver (aov, marketing
//! cost rate, delivery cost rate). A zero-variance vector on either side
//! makes the coefficient undefined; it is reported as 0 with a
//! low-confidence flag so NaN never reaches the output.

use storelens_stats::pearson;

use crate::types::{AttributionSection, DriverFactor, FactorCorrelation, StoreMetrics};

/// Factors in declaration order. The order breaks primary-factor ties.
const FACTORS: [DriverFactor; 3] = [
    DriverFactor::Aov,
    DriverFactor::MarketingCostRate,
    DriverFactor::DeliveryCostRate,
];

/// Correlate profit margin against each candidate driver.
pub fn analyze(stores: &[StoreMetrics]) -> AttributionSection {
    let margins: Vec<f64> = stores.iter().map(|s| s.profit_margin).collect();

    let factors: Vec<FactorCorrelation> = FACTORS
        .iter()
        .map(|&factor| {
            let values: Vec<f64> = stores.iter().map(|s| field(s, factor)).collect();
            match pearson(&margins, &values) {
                Some(r) => FactorCorrelation {
                    factor,
                    coefficient: r,
                    low_confidence: false,
                },
                None => FactorCorrelation {
                    factor,
                    coefficient: 0.0,
                    low_confidence: true,
                },
            }
        })
        .collect();

    // Largest |r| wins; a strictly-greater comparison keeps the earlier
    // factor on ties.
    let primary = factors
        .iter()
        .skip(1)
        .fold(&factors[0], |best, candidate| {
            if candidate.coefficient.abs() > best.coefficient.abs() {
                candidate
            } else {
                best
            }
        });
    let (primary_factor, primary_coefficient) = (primary.factor, primary.coefficient);

    AttributionSection {
        primary_factor,
        primary_coefficient,
        factors,
        summary: String::new(),
    }
}

fn field(store: &StoreMetrics, factor: DriverFactor) -> f64 {
    match factor {
        DriverFactor::Aov => store.aov,
        DriverFactor::MarketingCostRate => store.marketing_cost_rate,
        DriverFactor::DeliveryCostRate => store.delivery_cost_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str, profit: f64, aov: f64, marketing: f64, delivery: f64) -> StoreMetrics {
        StoreMetrics::new(name, 100, 1000.0, profit, aov, marketing, delivery).unwrap()
    }

    #[test]
    fn identical_margins_yield_zero_for_every_factor() {
        let stores = vec![
            store("A", 200.0, 30.0, 5.0, 8.0),
            store("B", 200.0, 50.0, 15.0, 12.0),
            store("C", 200.0, 70.0, 25.0, 16.0),
        ];
        let section = analyze(&stores);
        for factor in &section.factors {
            assert_eq!(factor.coefficient, 0.0);
            assert!(factor.low_confidence);
            assert!(factor.coefficient.is_finite());
        }
    }

    #[test]
    fn marketing_rate_drives_margin_down() {
        // Margin falls exactly as marketing rate rises: r = −1 for
        // marketing, and aov is held constant (zero variance → 0).
        let stores = vec![
            store("A", 300.0, 40.0, 5.0, 12.0),
            store("B", 250.0, 40.0, 10.0, 10.0),
            store("C", 200.0, 40.0, 15.0, 13.0),
            store("D", 150.0, 40.0, 20.0, 11.0),
        ];
        let section = analyze(&stores);
        let marketing = &section.factors[1];
        assert_eq!(marketing.factor, DriverFactor::MarketingCostRate);
        assert!((marketing.coefficient + 1.0).abs() < 1e-9);
        assert!(!marketing.low_confidence);

        let aov = &section.factors[0];
        assert_eq!(aov.coefficient, 0.0);
        assert!(aov.low_confidence);

        assert_eq!(section.primary_factor, DriverFactor::MarketingCostRate);
        assert!((section.primary_coefficient + 1.0).abs() < 1e-9);
    }

    #[test]
    fn ties_fall_to_declaration_order() {
        // Both cost rates move in lockstep with margin, so |r| ties at 1;
        // marketing is declared before delivery and wins.
        let stores = vec![
            store("A", 300.0, 40.0, 5.0, 5.0),
            store("B", 200.0, 45.0, 10.0, 10.0),
            store("C", 100.0, 50.0, 15.0, 15.0),
        ];
        let section = analyze(&stores);
        let abs: Vec<f64> = section
            .factors
            .iter()
            .map(|f| f.coefficient.abs())
            .collect();
        assert!((abs[1] - abs[2]).abs() < 1e-9);
        // aov also correlates perfectly here, so it takes the tie as the
        // first declared factor.
        assert_eq!(section.primary_factor, DriverFactor::Aov);
    }

    #[test]
    fn empty_input_degrades_to_low_confidence_zeroes() {
        let section = analyze(&[]);
        assert_eq!(section.factors.len(), 3);
        assert!(section.factors.iter().all(|f| f.low_confidence));
        assert_eq!(section.primary_factor, DriverFactor::Aov);
        assert_eq!(section.primary_coefficient, 0.0);
    }
}
