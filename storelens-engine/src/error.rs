//! Engine error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.
//!
//! Empty datasets and degenerate statistics are not errors — each analyzer
//! documents a deterministic fallback for them. The variants here are
//! data-quality rejections (the whole call fails rather than producing a
//! misleading ratio) and dataset-loading failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("store '{store}': negative order count")]
    NegativeOrderCount { store: String },

    #[error("store '{store}': non-zero profit with zero revenue leaves profit margin undefined")]
    ProfitWithoutRevenue { store: String },

    #[error("store '{store}': field '{field}' is not a finite number")]
    NonFiniteField { store: String, field: &'static str },

    #[error("duplicate store name '{store}' in dataset")]
    DuplicateStore { store: String },

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
