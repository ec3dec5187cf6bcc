//! SQLite adapters - Embedded database implementations for store ports.

mod session_store;

pub use session_store::SqliteSessionStore;
