//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::SessionRepository;
use crate::domain::estimation::{
    average_estimate, estimates_for_work_package, users_with_max_distance, users_without_estimate,
    EstimationError,
};
use crate::domain::foundation::ErrorKind;
use crate::domain::session::SessionError;

use super::dto::{
    AddEstimateRequest, AddWorkPackageRequest, AverageEstimateResponse, CommandResponse,
    CreateSessionResponse, ErrorResponse, EstimateSummary, EstimatesResponse, JoinSessionRequest,
    SetWorkPackageEstimateRequest, UsersResponse, WorkPackagesResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionAppState {
    repository: Arc<SessionRepository>,
}

impl SessionAppState {
    pub fn new(repository: Arc<SessionRepository>) -> Self {
        Self { repository }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sessions
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Create a new session
pub async fn create_session(State(state): State<SessionAppState>) -> Response {
    match state.repository.create_session().await {
        Ok(token) => (
            StatusCode::CREATED,
            Json(CreateSessionResponse::new(token.as_str())),
        )
            .into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// DELETE /api/sessions/:token - Remove a session
pub async fn remove_session(
    State(state): State<SessionAppState>,
    Path(token): Path<String>,
) -> Response {
    match state.repository.remove_session(&token).await {
        Ok(()) => (StatusCode::OK, Json(CommandResponse::ok())).into_response(),
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions/:token/users - Join a session
pub async fn join_session(
    State(state): State<SessionAppState>,
    Path(token): Path<String>,
    Json(req): Json<JoinSessionRequest>,
) -> Response {
    match state.repository.join_session(&token, &req.name).await {
        Ok(()) => (
            StatusCode::OK,
            Json(CommandResponse::with_route(format!(
                "/sessions/{}/users/{}",
                token, req.name
            ))),
        )
            .into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:token/users - List session users
pub async fn get_users(
    State(state): State<SessionAppState>,
    Path(token): Path<String>,
) -> Response {
    match state.repository.get_users(&token).await {
        Ok(users) => (StatusCode::OK, Json(UsersResponse::new(users))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// DELETE /api/sessions/:token/users/:name - Leave a session
pub async fn leave_session(
    State(state): State<SessionAppState>,
    Path((token, name)): Path<(String, String)>,
) -> Response {
    match state.repository.leave_session(&token, &name).await {
        Ok(()) => (StatusCode::OK, Json(CommandResponse::ok())).into_response(),
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Work packages
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions/:token/workpackages - Add a work package
pub async fn add_work_package(
    State(state): State<SessionAppState>,
    Path(token): Path<String>,
    Json(req): Json<AddWorkPackageRequest>,
) -> Response {
    match state
        .repository
        .add_work_package(&token, &req.id, req.summary)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(CommandResponse::with_route(format!(
                "/sessions/{}/workpackages/{}",
                token, req.id
            ))),
        )
            .into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:token/workpackages - List work packages
pub async fn get_work_packages(
    State(state): State<SessionAppState>,
    Path(token): Path<String>,
) -> Response {
    match state.repository.get_work_packages(&token).await {
        Ok(packages) => {
            (StatusCode::OK, Json(WorkPackagesResponse::new(packages))).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// DELETE /api/sessions/:token/workpackages/:id - Remove a work package
pub async fn remove_work_package(
    State(state): State<SessionAppState>,
    Path((token, id)): Path<(String, String)>,
) -> Response {
    match state.repository.remove_work_package(&token, &id).await {
        Ok(()) => (StatusCode::OK, Json(CommandResponse::ok())).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// PUT /api/sessions/:token/workpackages/:id - Set the agreed estimate
pub async fn set_work_package_estimate(
    State(state): State<SessionAppState>,
    Path((token, id)): Path<(String, String)>,
    Json(req): Json<SetWorkPackageEstimateRequest>,
) -> Response {
    match state
        .repository
        .add_estimate_to_work_package(&token, &id, req.effort, req.standard_deviation)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(CommandResponse::ok())).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// DELETE /api/sessions/:token/workpackages/:id/estimate - Clear the agreed estimate
pub async fn clear_work_package_estimate(
    State(state): State<SessionAppState>,
    Path((token, id)): Path<(String, String)>,
) -> Response {
    match state
        .repository
        .remove_estimate_from_work_package(&token, &id)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(CommandResponse::ok())).into_response(),
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Per-user estimates
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions/:token/estimates - Add a user's estimate
pub async fn add_estimate(
    State(state): State<SessionAppState>,
    Path(token): Path<String>,
    Json(req): Json<AddEstimateRequest>,
) -> Response {
    match state.repository.add_estimate(&token, req.into()).await {
        Ok(()) => (StatusCode::OK, Json(CommandResponse::ok())).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:token/estimates - List all estimates
pub async fn get_estimates(
    State(state): State<SessionAppState>,
    Path(token): Path<String>,
) -> Response {
    match state.repository.get_estimates(&token).await {
        Ok(estimates) => (StatusCode::OK, Json(EstimatesResponse::new(estimates))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// DELETE /api/sessions/:token/estimates/:id/users/:user - Remove a user's estimate
pub async fn remove_estimate(
    State(state): State<SessionAppState>,
    Path((token, id, user)): Path<(String, String, String)>,
) -> Response {
    match state.repository.remove_estimate(&token, &id, &user).await {
        Ok(()) => (StatusCode::OK, Json(CommandResponse::ok())).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:token/estimates/:id - Average estimate of a work package
pub async fn get_average_estimate(
    State(state): State<SessionAppState>,
    Path((token, id)): Path<(String, String)>,
) -> Response {
    let session = match state.repository.get_session(&token).await {
        Ok(session) => session,
        Err(e) => return handle_session_error(e),
    };
    let estimates = session.estimates();

    let result = estimates_for_work_package(estimates, &id).and_then(|matching| {
        let average = average_estimate(estimates, &id)?;
        Ok((average, users_without_estimate(session.users(), &matching)))
    });

    match result {
        Ok((average, missing)) => (
            StatusCode::OK,
            Json(AverageEstimateResponse::new(
                EstimateSummary::of(&average),
                missing,
            )),
        )
            .into_response(),
        Err(e) => handle_estimation_error(e),
    }
}

/// GET /api/sessions/:token/estimates/:id/users/distance - Most divergent users
pub async fn get_divergent_users(
    State(state): State<SessionAppState>,
    Path((token, id)): Path<(String, String)>,
) -> Response {
    let estimates = match state.repository.get_estimates(&token).await {
        Ok(estimates) => estimates,
        Err(e) => return handle_session_error(e),
    };

    match users_with_max_distance(&estimates, &id) {
        Ok(ranking) => (StatusCode::OK, Json(UsersResponse::from(ranking))).into_response(),
        Err(e) => handle_estimation_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::InsufficientData => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(kind: ErrorKind, reason: String) -> Response {
    let status = status_for(kind);
    if status.is_server_error() {
        error!(code = %kind, reason = %reason, "Request failed");
    }
    (status, Json(ErrorResponse::new(kind, reason))).into_response()
}

fn handle_session_error(error: SessionError) -> Response {
    error_response(error.kind(), error.to_string())
}

fn handle_estimation_error(error: EstimationError) -> Response {
    error_response(error.kind(), error.to_string())
}
