//! Session store port.
//!
//! Defines the document-store capability the session repository is built
//! on: one document per session, addressed by its token.
//!
//! # Design
//!
//! - **Point lookups**: every read is keyed by token, never a table scan
//! - **Whole-document writes**: updates replace the full session document
//! - **Optimistic concurrency**: each document carries a revision that
//!   `replace` compares before writing

use async_trait::async_trait;

use crate::domain::foundation::SessionToken;
use crate::domain::session::Session;

/// Errors that can occur during session store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Failed to (de)serialize session document: {0}")]
    Serialization(String),

    #[error("Session {0} already exists")]
    DuplicateKey(String),

    #[error("Session {token} was modified concurrently (expected revision {expected})")]
    RevisionConflict { token: String, expected: u64 },

    #[error("Session {0} not found in store")]
    NotFound(String),
}

/// A session document together with its store revision.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub session: Session,
    pub revision: u64,
}

/// Port for persisting session documents.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create the sessions collection if it does not exist yet.
    ///
    /// Must be idempotent.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Insert a new session document at revision 0.
    ///
    /// # Errors
    ///
    /// - `DuplicateKey` if a document with the same token exists
    async fn insert(&self, session: &Session) -> Result<(), StoreError>;

    /// Look up a session document by token.
    ///
    /// Returns `None` if not found.
    async fn find(&self, token: &SessionToken) -> Result<Option<StoredSession>, StoreError>;

    /// Replace a session document, provided it is still at `expected_revision`.
    ///
    /// # Errors
    ///
    /// - `RevisionConflict` if the stored revision differs
    /// - `NotFound` if the document no longer exists
    async fn replace(&self, session: &Session, expected_revision: u64) -> Result<(), StoreError>;

    /// Delete a session document.
    ///
    /// Returns whether a document was removed.
    async fn delete(&self, token: &SessionToken) -> Result<bool, StoreError>;
}
