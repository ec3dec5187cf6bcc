//! Estimation-specific error types.

use thiserror::Error;

use crate::domain::foundation::ErrorKind;

/// Errors raised while validating or aggregating estimates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    #[error("Best case must be >= 0, provided: {0}")]
    NegativeBestCase(f64),

    #[error("Most likely case must be >= 0, provided: {0}")]
    NegativeMostLikely(f64),

    #[error("Most likely case ({most_likely}) is below best case ({best})")]
    MostLikelyBelowBestCase { best: f64, most_likely: f64 },

    #[error("Worst case must be >= 0, provided: {0}")]
    NegativeWorstCase(f64),

    #[error("Worst case ({worst}) is below most likely case ({most_likely})")]
    WorstCaseBelowMostLikely { most_likely: f64, worst: f64 },

    #[error("Effort must be >= 0, provided: {0}")]
    NegativeEffort(f64),

    #[error("Standard deviation must be >= 0, provided: {0}")]
    NegativeStandardDeviation(f64),

    #[error("{field} must be a finite number, provided: {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("Work package ID cannot be empty")]
    EmptyWorkPackageId,

    #[error("Not enough data to process")]
    NoEstimates,

    #[error("Work package with ID: {0} has no estimates")]
    WorkPackageNotEstimated(String),
}

impl EstimationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EstimationError::NoEstimates | EstimationError::WorkPackageNotEstimated(_) => {
                ErrorKind::InsufficientData
            }
            _ => ErrorKind::Validation,
        }
    }
}
