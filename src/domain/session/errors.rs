//! Session-specific error types.

use thiserror::Error;

use crate::domain::estimation::EstimationError;
use crate::domain::foundation::{ErrorKind, TokenError, ValidationError};
use crate::ports::StoreError;

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid estimate: {0}")]
    InvalidEstimate(#[from] EstimationError),

    #[error("Specified session does not exist")]
    SessionNotFound,

    #[error("User with name: {0} already part of session")]
    UserAlreadyJoined(String),

    #[error("User with name: {0} is not part of session")]
    UserNotInSession(String),

    #[error("Work package with ID: {0} already part of session")]
    WorkPackageAlreadyExists(String),

    #[error("Work package with ID: {0} is not part of session")]
    WorkPackageNotFound(String),

    #[error("Estimate of user {user_name} for work package {work_package_id} already exists")]
    EstimateAlreadyExists {
        work_package_id: String,
        user_name: String,
    },

    #[error("No estimate of user {user_name} for work package {work_package_id}")]
    EstimateNotFound {
        work_package_id: String,
        user_name: String,
    },

    #[error("Unable to create session token: {0}")]
    TokenGeneration(#[from] TokenError),

    #[error("Unable to create sessions table: {0}")]
    StoreInit(String),

    #[error("Session store failure: {0}")]
    Store(String),
}

impl SessionError {
    pub fn estimate_already_exists(
        work_package_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        SessionError::EstimateAlreadyExists {
            work_package_id: work_package_id.into(),
            user_name: user_name.into(),
        }
    }

    pub fn estimate_not_found(
        work_package_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        SessionError::EstimateNotFound {
            work_package_id: work_package_id.into(),
            user_name: user_name.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Validation(_) => ErrorKind::Validation,
            SessionError::InvalidEstimate(e) => e.kind(),
            SessionError::SessionNotFound
            | SessionError::UserNotInSession(_)
            | SessionError::WorkPackageNotFound(_)
            | SessionError::EstimateNotFound { .. } => ErrorKind::NotFound,
            SessionError::UserAlreadyJoined(_)
            | SessionError::WorkPackageAlreadyExists(_)
            | SessionError::EstimateAlreadyExists { .. } => ErrorKind::Conflict,
            SessionError::TokenGeneration(_)
            | SessionError::StoreInit(_)
            | SessionError::Store(_) => ErrorKind::Store,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => SessionError::SessionNotFound,
            other => SessionError::Store(other.to_string()),
        }
    }
}
