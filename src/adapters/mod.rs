//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `sqlite` - Embedded session store (sqlx SQLite)
//! - `memory` - In-memory session store for tests and development
//! - `random` - Operating-system entropy for session tokens
//! - `http` - REST API over the session repository (axum)

pub mod http;
pub mod memory;
pub mod random;
pub mod sqlite;

pub use memory::InMemorySessionStore;
pub use random::OsRandomSource;
pub use sqlite::SqliteSessionStore;
