//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (session token, errors)
//! - `estimation` - PERT estimates, aggregation and max-distance ranking
//! - `session` - Session aggregate with users, work packages and estimates

pub mod estimation;
pub mod foundation;
pub mod session;
