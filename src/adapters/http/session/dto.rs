//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::estimation::{DivergentUsers, Estimator, UserEstimate};
use crate::domain::foundation::ErrorKind;
use crate::domain::session::WorkPackage;

pub const MESSAGE_OK: &str = "ok";
pub const MESSAGE_WARNING: &str = "warning";
pub const MESSAGE_ERROR: &str = "error";
pub const MISSING_ESTIMATES_HINT: &str = "not all users did provide estimates";

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to join a session.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinSessionRequest {
    pub name: String,
}

/// Request to add a work package.
#[derive(Debug, Clone, Deserialize)]
pub struct AddWorkPackageRequest {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Request to set the aggregate estimate of a work package.
#[derive(Debug, Clone, Deserialize)]
pub struct SetWorkPackageEstimateRequest {
    pub effort: f64,
    pub standard_deviation: f64,
}

/// Request to store one user's three-point estimate.
#[derive(Debug, Clone, Deserialize)]
pub struct AddEstimateRequest {
    pub work_package_id: String,
    pub user_name: String,
    pub best_case: f64,
    pub most_likely_case: f64,
    pub worst_case: f64,
}

impl From<AddEstimateRequest> for UserEstimate {
    fn from(req: AddEstimateRequest) -> Self {
        UserEstimate::new(
            req.work_package_id,
            req.user_name,
            req.best_case,
            req.most_likely_case,
            req.worst_case,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Acknowledgement of a command, with the location of the touched resource.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl CommandResponse {
    pub fn ok() -> Self {
        Self {
            message: MESSAGE_OK.to_string(),
            route: None,
        }
    }

    pub fn with_route(route: impl Into<String>) -> Self {
        Self {
            message: MESSAGE_OK.to_string(),
            route: Some(route.into()),
        }
    }
}

/// Response for a newly created session.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionResponse {
    pub message: String,
    pub token: String,
    pub route: String,
}

impl CreateSessionResponse {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            message: MESSAGE_OK.to_string(),
            route: format!("/sessions/{}", token),
            token,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub message: String,
    pub users: Vec<String>,
}

impl UsersResponse {
    pub fn new(users: Vec<String>) -> Self {
        Self {
            message: MESSAGE_OK.to_string(),
            users,
        }
    }
}

impl From<DivergentUsers> for UsersResponse {
    fn from(ranking: DivergentUsers) -> Self {
        Self::new(vec![ranking.highest, ranking.lowest])
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkPackagesResponse {
    pub message: String,
    pub work_packages: Vec<WorkPackage>,
}

impl WorkPackagesResponse {
    pub fn new(work_packages: Vec<WorkPackage>) -> Self {
        Self {
            message: MESSAGE_OK.to_string(),
            work_packages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimatesResponse {
    pub message: String,
    pub estimates: Vec<UserEstimate>,
}

impl EstimatesResponse {
    pub fn new(estimates: Vec<UserEstimate>) -> Self {
        Self {
            message: MESSAGE_OK.to_string(),
            estimates,
        }
    }
}

/// PERT effort and standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimateSummary {
    pub effort: f64,
    pub standard_deviation: f64,
}

impl EstimateSummary {
    pub fn of(estimate: &impl Estimator) -> Self {
        Self {
            effort: estimate.effort(),
            standard_deviation: estimate.standard_deviation(),
        }
    }
}

/// Average over all estimates of a work package.
///
/// `users` lists the session members who have not estimated yet; when it is
/// non-empty the message is `warning` and a hint is attached.
#[derive(Debug, Clone, Serialize)]
pub struct AverageEstimateResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub users: Vec<String>,
    pub estimate: EstimateSummary,
}

impl AverageEstimateResponse {
    pub fn new(estimate: EstimateSummary, missing_users: Vec<String>) -> Self {
        let (message, hint) = if missing_users.is_empty() {
            (MESSAGE_OK, None)
        } else {
            (MESSAGE_WARNING, Some(MISSING_ESTIMATES_HINT.to_string()))
        };

        Self {
            message: message.to_string(),
            hint,
            users: missing_users,
            estimate,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
    pub reason: String,
}

impl ErrorResponse {
    pub fn new(kind: ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            message: MESSAGE_ERROR.to_string(),
            code: kind.to_string(),
            reason: reason.into(),
        }
    }
}
