//! Session domain module.
//!
//! A session groups the users, work packages and per-user estimates of one
//! Delphi estimation round. All membership and uniqueness rules live on the
//! [`Session`] aggregate; persistence is the repository's concern.

mod aggregate;
mod errors;
mod work_package;

pub use aggregate::Session;
pub use errors::SessionError;
pub use work_package::{validate_aggregate, WorkPackage};
