//! Three-point (PERT) estimate.

use serde::Serialize;

use super::EstimationError;

/// Anything that yields an effort and its uncertainty.
pub trait Estimator {
    /// Expected effort.
    fn effort(&self) -> f64;

    /// Uncertainty of the expected effort.
    fn standard_deviation(&self) -> f64;
}

/// A validated best / most likely / worst case triple.
///
/// Construction guarantees `0 <= best <= most_likely <= worst`, all finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DelphiEstimate {
    best_case: f64,
    most_likely_case: f64,
    worst_case: f64,
}

impl DelphiEstimate {
    /// Validates the triple and builds the estimate.
    ///
    /// Checks run in a fixed order and the first violation is returned.
    pub fn new(best: f64, most_likely: f64, worst: f64) -> Result<Self, EstimationError> {
        if best.is_nan() || best < 0.0 {
            return Err(EstimationError::NegativeBestCase(best));
        }
        require_finite("best_case", best)?;
        if most_likely.is_nan() || most_likely < 0.0 {
            return Err(EstimationError::NegativeMostLikely(most_likely));
        }
        require_finite("most_likely_case", most_likely)?;
        if most_likely < best {
            return Err(EstimationError::MostLikelyBelowBestCase { best, most_likely });
        }
        if worst.is_nan() || worst < 0.0 {
            return Err(EstimationError::NegativeWorstCase(worst));
        }
        require_finite("worst_case", worst)?;
        if worst < most_likely {
            return Err(EstimationError::WorstCaseBelowMostLikely { most_likely, worst });
        }

        Ok(Self {
            best_case: best,
            most_likely_case: most_likely,
            worst_case: worst,
        })
    }

    pub fn best_case(&self) -> f64 {
        self.best_case
    }

    pub fn most_likely_case(&self) -> f64 {
        self.most_likely_case
    }

    pub fn worst_case(&self) -> f64 {
        self.worst_case
    }
}

/// Infinite values cannot be stored: JSON has no representation for them.
pub fn require_finite(field: &'static str, value: f64) -> Result<(), EstimationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EstimationError::NotFinite { field, value })
    }
}

impl Estimator for DelphiEstimate {
    fn effort(&self) -> f64 {
        (self.best_case + 4.0 * self.most_likely_case + self.worst_case) / 6.0
    }

    fn standard_deviation(&self) -> f64 {
        (self.worst_case - self.best_case) / 6.0
    }
}
