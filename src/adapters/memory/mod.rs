//! In-memory adapters for tests and development.

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
