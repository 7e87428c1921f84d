//! Numeric kernel for the storelens analytics engine.
//!
//! Pure scalar statistics with no domain knowledge: descriptive summaries,
//! weighted ratios, Pearson correlation, and percentile-range score
//! normalization. Every function is total over its input — empty slices and
//! zero-variance data produce documented fallback values, never NaN.

pub mod correlation;
pub mod describe;
pub mod normalize;

pub use correlation::pearson;
pub use describe::{describe, percentile, weighted_ratio, Summary};
pub use normalize::PercentileScale;
