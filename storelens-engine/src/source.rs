//! The dataset-source seam.
//!
//! The engine is a pure computation; the query collaborators that produce
//! its datasets live behind this trait. The only asynchronous boundary in
//! the system is here — everything downstream of `generate_insights` is
//! synchronous.

use async_trait::async_trait;

use crate::metrics_loader;
use crate::types::{StoreMetrics, StoreMetricsDelta};

/// Supplies the per-store metrics datasets for one analysis call.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch the current-period dataset.
    async fn fetch_current(&self) -> Result<Vec<StoreMetrics>, String>;

    /// Fetch the paired current/previous dataset, if this source has one.
    /// Absence disables trend analysis, nothing more.
    async fn fetch_deltas(&self) -> Result<Option<Vec<StoreMetricsDelta>>, String> {
        Ok(None)
    }

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// File-backed source reading the datasets from CSV.
pub struct CsvMetricsSource {
    current_path: String,
    previous_path: Option<String>,
}

impl CsvMetricsSource {
    pub fn new(current_path: impl Into<String>, previous_path: Option<String>) -> Self {
        Self {
            current_path: current_path.into(),
            previous_path,
        }
    }
}

#[async_trait]
impl MetricsSource for CsvMetricsSource {
    async fn fetch_current(&self) -> Result<Vec<StoreMetrics>, String> {
        metrics_loader::load_metrics_file(&self.current_path)
            .map_err(|e| format!("failed to load '{}': {}", self.current_path, e))
    }

    async fn fetch_deltas(&self) -> Result<Option<Vec<StoreMetricsDelta>>, String> {
        match &self.previous_path {
            None => Ok(None),
            Some(previous) => metrics_loader::load_paired_files(&self.current_path, previous)
                .map(Some)
                .map_err(|e| format!("failed to pair '{}' with '{}': {}", self.current_path, previous, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource {
        stores: Vec<StoreMetrics>,
    }

    #[async_trait]
    impl MetricsSource for FixedSource {
        async fn fetch_current(&self) -> Result<Vec<StoreMetrics>, String> {
            Ok(self.stores.clone())
        }
    }

    #[tokio::test]
    async fn default_source_has_no_deltas() {
        let source = FixedSource {
            stores: vec![
                StoreMetrics::new("A", 100, 1000.0, 300.0, 40.0, 5.0, 8.0).unwrap(),
            ],
        };
        let current = source.fetch_current().await.unwrap();
        assert_eq!(current.len(), 1);
        assert!(source.fetch_deltas().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn source_name_is_the_bare_type() {
        let source = FixedSource { stores: Vec::new() };
        assert_eq!(source.name(), "FixedSource");
    }

    #[tokio::test]
    async fn csv_source_reports_missing_files() {
        let source = CsvMetricsSource::new("/nonexistent/metrics.csv", None);
        let err = source.fetch_current().await.unwrap_err();
        assert!(err.contains("/nonexistent/metrics.csv"));
    }
}
