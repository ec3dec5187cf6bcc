//! Work package entity.

use serde::{Deserialize, Serialize};

use crate::domain::estimation::{require_finite, EstimationError};
use crate::domain::foundation::{require_non_empty, ValidationError};

/// A unit of work estimated within a session.
///
/// `effort` and `standard_deviation` hold the agreed aggregate estimate and
/// are zero until one is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPackage {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    effort: f64,
    #[serde(default)]
    standard_deviation: f64,
}

impl WorkPackage {
    /// Creates an unestimated work package.
    pub fn new(id: impl Into<String>, summary: Option<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        require_non_empty("id", &id)?;

        Ok(Self {
            id,
            summary,
            effort: 0.0,
            standard_deviation: 0.0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn effort(&self) -> f64 {
        self.effort
    }

    pub fn standard_deviation(&self) -> f64 {
        self.standard_deviation
    }

    /// Sets the aggregate estimate.
    pub fn set_estimate(&mut self, effort: f64, standard_deviation: f64) -> Result<(), EstimationError> {
        validate_aggregate(effort, standard_deviation)?;
        self.effort = effort;
        self.standard_deviation = standard_deviation;
        Ok(())
    }

    /// Resets the aggregate estimate to zero.
    pub fn clear_estimate(&mut self) {
        self.effort = 0.0;
        self.standard_deviation = 0.0;
    }
}

/// Checks an aggregate effort / standard deviation pair.
pub fn validate_aggregate(effort: f64, standard_deviation: f64) -> Result<(), EstimationError> {
    if effort.is_nan() || effort < 0.0 {
        return Err(EstimationError::NegativeEffort(effort));
    }
    require_finite("effort", effort)?;
    if standard_deviation.is_nan() || standard_deviation < 0.0 {
        return Err(EstimationError::NegativeStandardDeviation(standard_deviation));
    }
    require_finite("standard_deviation", standard_deviation)
}
