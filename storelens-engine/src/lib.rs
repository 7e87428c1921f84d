//! Store insights analysis engine.
//!
//! A stateless, rule-based statistical pipeline that turns a flat collection
//! of per-store business metrics into a structured diagnostic report:
//! overview statistics, performance clustering, anomaly detection, head/tail
//! comparison, profitability attribution, trend classification, composite
//! health scoring, cost-structure analysis, and prioritized recommendations.
//!
//! The entry point is [`insights::generate_insights`]. Each call owns its
//! input snapshot and its report; there is no shared mutable state, no I/O,
//! and no persistence inside the engine.

pub mod anomaly;
pub mod attribution;
pub mod cluster;
pub mod cost_structure;
pub mod error;
pub mod head_tail;
pub mod health;
pub mod insights;
pub mod metrics_loader;
pub mod recommendation;
pub mod report_text;
pub mod source;
pub mod thresholds;
pub mod trend;
pub mod types;

pub use error::{EngineError, EngineResult};
pub use insights::{generate_insights, generate_insights_with_config};
pub use thresholds::AnalysisConfig;
pub use types::{InsightsReport, StoreMetrics, StoreMetricsDelta};
