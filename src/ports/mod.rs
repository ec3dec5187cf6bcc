//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - Document persistence for sessions
//! - `RandomSource` - Entropy for session token generation

mod random_source;
mod session_store;

pub use random_source::{RandomSource, RandomSourceError};
pub use session_store::{SessionStore, StoreError, StoredSession};
