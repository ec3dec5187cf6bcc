//! Application layer - Use cases over the session store.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The repository validates input, serializes writes per session and maps
//! store failures to domain errors.

mod session_locks;
mod session_repository;

pub use session_locks::SessionLocks;
pub use session_repository::SessionRepository;
