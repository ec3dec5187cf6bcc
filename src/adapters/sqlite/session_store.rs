//! SQLite implementation of SessionStore.
//!
//! Persists each session as one JSON document keyed by its token. The
//! `revision` column backs the optimistic concurrency check in `replace`.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

use crate::domain::foundation::SessionToken;
use crate::domain::session::Session;
use crate::ports::{SessionStore, StoreError, StoredSession};

/// SQLite implementation of SessionStore.
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Creates a new SqliteSessionStore over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (and creates if missing) the database at `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::Connection(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to open database: {}", e)))?;

        Ok(Self::new(pool))
    }

    async fn revision_of(&self, token: &str) -> Result<Option<u64>, StoreError> {
        let row = sqlx::query("SELECT revision FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Query(format!("Failed to fetch revision: {}", e)))?;

        row.map(|row| {
            row.try_get::<i64, _>("revision")
                .map(|r| r as u64)
                .map_err(|e| StoreError::Query(format!("Failed to get revision: {}", e)))
        })
        .transpose()
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY NOT NULL,
                revision INTEGER NOT NULL DEFAULT 0,
                document TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(format!("Failed to create sessions table: {}", e)))?;

        Ok(())
    }

    async fn insert(&self, session: &Session) -> Result<(), StoreError> {
        let document = encode(session)?;

        sqlx::query("INSERT INTO sessions (token, revision, document) VALUES (?, 0, ?)")
            .bind(session.token().as_str())
            .bind(document)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::DuplicateKey(session.token().to_string())
                }
                other => StoreError::Query(format!("Failed to insert session: {}", other)),
            })?;

        Ok(())
    }

    async fn find(&self, token: &SessionToken) -> Result<Option<StoredSession>, StoreError> {
        let row = sqlx::query("SELECT revision, document FROM sessions WHERE token = ?")
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Query(format!("Failed to fetch session: {}", e)))?;

        match row {
            Some(row) => {
                let revision: i64 = row
                    .try_get("revision")
                    .map_err(|e| StoreError::Query(format!("Failed to get revision: {}", e)))?;
                let document: String = row
                    .try_get("document")
                    .map_err(|e| StoreError::Query(format!("Failed to get document: {}", e)))?;

                Ok(Some(StoredSession {
                    session: decode(&document)?,
                    revision: revision as u64,
                }))
            }
            None => Ok(None),
        }
    }

    async fn replace(&self, session: &Session, expected_revision: u64) -> Result<(), StoreError> {
        let document = encode(session)?;

        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                document = ?,
                revision = revision + 1
            WHERE token = ? AND revision = ?
            "#,
        )
        .bind(document)
        .bind(session.token().as_str())
        .bind(expected_revision as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(format!("Failed to update session: {}", e)))?;

        if result.rows_affected() == 0 {
            return match self.revision_of(session.token().as_str()).await? {
                Some(_) => Err(StoreError::RevisionConflict {
                    token: session.token().to_string(),
                    expected: expected_revision,
                }),
                None => Err(StoreError::NotFound(session.token().to_string())),
            };
        }

        Ok(())
    }

    async fn delete(&self, token: &SessionToken) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(format!("Failed to delete session: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn encode(session: &Session) -> Result<String, StoreError> {
    serde_json::to_string(session).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode(document: &str) -> Result<Session, StoreError> {
    serde_json::from_str(document).map_err(|e| StoreError::Serialization(e.to_string()))
}
