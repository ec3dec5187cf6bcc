//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddEstimateRequest, AddWorkPackageRequest, AverageEstimateResponse, CommandResponse,
    CreateSessionResponse, ErrorResponse, EstimateSummary, EstimatesResponse, JoinSessionRequest,
    SetWorkPackageEstimateRequest, UsersResponse, WorkPackagesResponse,
};
pub use handlers::SessionAppState;
pub use routes::session_router;
