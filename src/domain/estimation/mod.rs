//! Estimation domain module.
//!
//! PERT arithmetic over three-point estimates and the aggregations the
//! API offers on top of them: averaging, missing-estimator detection and
//! max-distance ranking.

mod aggregation;
mod delphi;
mod errors;
mod ranking;
mod user_estimate;

pub use aggregation::{average_estimate, estimates_for_work_package, users_without_estimate};
pub use delphi::{require_finite, DelphiEstimate, Estimator};
pub use errors::EstimationError;
pub use ranking::{users_with_max_distance, DivergentUsers};
pub use user_estimate::UserEstimate;
