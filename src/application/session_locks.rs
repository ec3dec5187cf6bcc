//! SessionLocks - per-token mutual exclusion for read-modify-write cycles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::SessionToken;

/// Table of async locks, one per session token.
///
/// Holding the guard for a token serializes every mutation of that session
/// within this process. Different tokens never contend.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<SessionToken, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the session.
    pub async fn acquire(&self, token: &SessionToken) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(token.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drops the token's entry if nobody holds or waits for its lock.
    ///
    /// Call after the guard is dropped. Guards and waiters keep a clone of
    /// the entry, so a count of one means only the table references it.
    pub fn release_if_idle(&self, token: &SessionToken) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if locks
            .get(token)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(token);
        }
    }

    /// Number of tokens with a lock entry.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
