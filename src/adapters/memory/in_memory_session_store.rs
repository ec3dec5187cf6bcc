//! In-Memory Session Store Adapter
//!
//! Stores session documents in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionToken;
use crate::domain::session::Session;
use crate::ports::{SessionStore, StoreError, StoredSession};

/// In-memory storage for session documents
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, StoredSession>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.token()) {
            return Err(StoreError::DuplicateKey(session.token().to_string()));
        }
        sessions.insert(
            session.token().clone(),
            StoredSession {
                session: session.clone(),
                revision: 0,
            },
        );
        Ok(())
    }

    async fn find(&self, token: &SessionToken) -> Result<Option<StoredSession>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(token).cloned())
    }

    async fn replace(&self, session: &Session, expected_revision: u64) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions
            .get_mut(session.token())
            .ok_or_else(|| StoreError::NotFound(session.token().to_string()))?;

        if stored.revision != expected_revision {
            return Err(StoreError::RevisionConflict {
                token: session.token().to_string(),
                expected: expected_revision,
            });
        }

        stored.session = session.clone();
        stored.revision += 1;
        Ok(())
    }

    async fn delete(&self, token: &SessionToken) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(token).is_some())
    }
}
