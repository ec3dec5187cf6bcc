//! Aggregations over the per-user estimates of one work package.

use super::{DelphiEstimate, EstimationError, UserEstimate};

/// Selects the estimates belonging to one work package.
///
/// An empty ID is a caller bug; an empty input or a work package nobody
/// estimated is a lack of data.
pub fn estimates_for_work_package<'a>(
    estimates: &'a [UserEstimate],
    work_package_id: &str,
) -> Result<Vec<&'a UserEstimate>, EstimationError> {
    if work_package_id.is_empty() {
        return Err(EstimationError::EmptyWorkPackageId);
    }
    if estimates.is_empty() {
        return Err(EstimationError::NoEstimates);
    }

    let matching: Vec<&UserEstimate> = estimates
        .iter()
        .filter(|e| e.work_package_id == work_package_id)
        .collect();

    if matching.is_empty() {
        return Err(EstimationError::WorkPackageNotEstimated(
            work_package_id.to_string(),
        ));
    }

    Ok(matching)
}

/// Averages best, most likely and worst case over all users who estimated
/// the work package.
pub fn average_estimate(
    estimates: &[UserEstimate],
    work_package_id: &str,
) -> Result<DelphiEstimate, EstimationError> {
    let matching = estimates_for_work_package(estimates, work_package_id)?;
    let count = matching.len() as f64;

    let (best, most_likely, worst) = matching.iter().fold((0.0, 0.0, 0.0), |acc, e| {
        (
            acc.0 + e.best_case,
            acc.1 + e.most_likely_case,
            acc.2 + e.worst_case,
        )
    });

    DelphiEstimate::new(best / count, most_likely / count, worst / count)
}

/// Users, in session order, with no estimate among `estimates`.
pub fn users_without_estimate(users: &[String], estimates: &[&UserEstimate]) -> Vec<String> {
    users
        .iter()
        .filter(|user| !estimates.iter().any(|e| &e.user_name == *user))
        .cloned()
        .collect()
}
