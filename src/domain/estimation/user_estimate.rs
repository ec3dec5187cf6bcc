//! One user's raw three-point estimate for one work package.

use serde::{Deserialize, Serialize};

use super::{DelphiEstimate, EstimationError};

/// Raw estimate as stored in a session.
///
/// `(work_package_id, user_name)` is the natural key within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEstimate {
    pub work_package_id: String,
    pub user_name: String,
    pub best_case: f64,
    pub most_likely_case: f64,
    pub worst_case: f64,
}

impl UserEstimate {
    pub fn new(
        work_package_id: impl Into<String>,
        user_name: impl Into<String>,
        best_case: f64,
        most_likely_case: f64,
        worst_case: f64,
    ) -> Self {
        Self {
            work_package_id: work_package_id.into(),
            user_name: user_name.into(),
            best_case,
            most_likely_case,
            worst_case,
        }
    }

    /// Rebuilds the validated estimate from the raw triple.
    pub fn to_delphi(&self) -> Result<DelphiEstimate, EstimationError> {
        DelphiEstimate::new(self.best_case, self.most_likely_case, self.worst_case)
    }

    /// Whether this estimate has the given natural key.
    pub fn is_keyed_by(&self, work_package_id: &str, user_name: &str) -> bool {
        self.work_package_id == work_package_id && self.user_name == user_name
    }
}
