//! Centralized detection thresholds for store insights analysis.
//!
//! These values are calibrated for multi-store food/retail delivery fleets.
//! Changing a threshold here affects anomaly detection, cost-structure
//! analysis, and the recommendations derived from both.

/// Z-score magnitude above which a store's profit margin is flagged.
pub const Z_SCORE_FLAG: f64 = 2.0;

/// Z-score magnitude above which a margin anomaly is considered high severity.
pub const Z_SCORE_SEVERE: f64 = 3.0;

/// IQR multiplier for order-count outlier bounds (Tukey fences).
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Marketing cost rate (% of revenue) above which a store is flagged.
pub const MARKETING_ALERT_RATE: f64 = 15.0;

/// Marketing cost rate above which the flag becomes high severity.
pub const MARKETING_SEVERE_RATE: f64 = 25.0;

/// Delivery cost rate (% of revenue) above which a store is flagged.
pub const DELIVERY_ALERT_RATE: f64 = 20.0;

/// Delivery cost rate above which the flag becomes high severity.
pub const DELIVERY_SEVERE_RATE: f64 = 30.0;

/// Minimum |Pearson r| for a profitability driver to earn a recommendation.
pub const PRIMARY_FACTOR_FLOOR: f64 = 0.5;

/// Health score weights. Must sum to 1.0.
pub const HEALTH_WEIGHT_MARGIN: f64 = 0.4;
pub const HEALTH_WEIGHT_ORDERS: f64 = 0.2;
pub const HEALTH_WEIGHT_MARKETING: f64 = 0.2;
pub const HEALTH_WEIGHT_DELIVERY: f64 = 0.2;

/// Immutable analysis configuration.
///
/// Passed by reference into the analyzers that consult thresholds, so tests
/// can exercise alternate bands without process-wide side effects. `Default`
/// is the production calibration above.
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    pub z_score_flag: f64,
    pub z_score_severe: f64,
    pub iqr_multiplier: f64,
    pub marketing_alert_rate: f64,
    pub marketing_severe_rate: f64,
    pub delivery_alert_rate: f64,
    pub delivery_severe_rate: f64,
    pub primary_factor_floor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            z_score_flag: Z_SCORE_FLAG,
            z_score_severe: Z_SCORE_SEVERE,
            iqr_multiplier: IQR_MULTIPLIER,
            marketing_alert_rate: MARKETING_ALERT_RATE,
            marketing_severe_rate: MARKETING_SEVERE_RATE,
            delivery_alert_rate: DELIVERY_ALERT_RATE,
            delivery_severe_rate: DELIVERY_SEVERE_RATE,
            primary_factor_floor: PRIMARY_FACTOR_FLOOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_weights_sum_to_one() {
        let sum = HEALTH_WEIGHT_MARGIN
            + HEALTH_WEIGHT_ORDERS
            + HEALTH_WEIGHT_MARKETING
            + HEALTH_WEIGHT_DELIVERY;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn default_config_matches_constants() {
        let config = AnalysisConfig::default();
        assert_eq!(config.z_score_flag, Z_SCORE_FLAG);
        assert_eq!(config.marketing_alert_rate, MARKETING_ALERT_RATE);
        assert_eq!(config.delivery_severe_rate, DELIVERY_SEVERE_RATE);
    }
}
