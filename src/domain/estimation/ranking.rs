//! Max-distance ranking of per-user estimates.

use serde::Serialize;

use super::{estimates_for_work_package, EstimationError, Estimator, UserEstimate};

/// The two users whose computed efforts lie furthest apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivergentUsers {
    /// User with the highest computed effort.
    pub highest: String,
    /// User with the lowest computed effort, empty if only one user estimated.
    pub lowest: String,
}

/// Finds the users with the highest and lowest effort for a work package.
///
/// Efforts are sorted in descending order with a stable sort, so users with
/// equal effort keep their insertion order: the first of them ranks highest.
/// The first malformed stored estimate aborts the ranking.
pub fn users_with_max_distance(
    estimates: &[UserEstimate],
    work_package_id: &str,
) -> Result<DivergentUsers, EstimationError> {
    let matching = estimates_for_work_package(estimates, work_package_id)?;

    let mut ranked = matching
        .into_iter()
        .map(|e| e.to_delphi().map(|d| (e.user_name.as_str(), d.effort())))
        .collect::<Result<Vec<(&str, f64)>, EstimationError>>()?;

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let highest = ranked[0].0.to_string();
    let lowest = if ranked.len() > 1 {
        ranked[ranked.len() - 1].0.to_string()
    } else {
        String::new()
    };

    Ok(DivergentUsers { highest, lowest })
}
