//! SessionRepository - session, user, work package and estimate operations.
//!
//! Every operation validates its input before touching the store, then
//! reads the session document, applies the change on the [`Session`]
//! aggregate and writes the whole document back. Mutations of one token run
//! under that token's lock and the write is a revision compare-and-swap, so
//! concurrent callers cannot lose each other's updates.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::SessionLocks;
use crate::domain::estimation::UserEstimate;
use crate::domain::foundation::{require_non_empty, SessionToken};
use crate::domain::session::{validate_aggregate, Session, SessionError, WorkPackage};
use crate::ports::{RandomSource, SessionStore, StoredSession};

/// Session repository over a document store.
pub struct SessionRepository {
    store: Arc<dyn SessionStore>,
    random: Arc<dyn RandomSource>,
    locks: SessionLocks,
}

impl SessionRepository {
    /// Creates the repository and makes sure the sessions table exists.
    ///
    /// # Errors
    ///
    /// - `StoreInit` if the table cannot be created
    pub async fn new(
        store: Arc<dyn SessionStore>,
        random: Arc<dyn RandomSource>,
    ) -> Result<Self, SessionError> {
        store
            .ensure_schema()
            .await
            .map_err(|e| SessionError::StoreInit(e.to_string()))?;

        Ok(Self {
            store,
            random,
            locks: SessionLocks::new(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sessions
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates an empty session and returns its token.
    pub async fn create_session(&self) -> Result<SessionToken, SessionError> {
        let token = SessionToken::generate(self.random.as_ref())?;
        self.store.insert(&Session::new(token.clone())).await?;

        info!(token = %token, "Created session");
        Ok(token)
    }

    /// Deletes a session with everything in it.
    pub async fn remove_session(&self, token: &str) -> Result<(), SessionError> {
        let token = SessionToken::parse(token)?;

        let guard = self.locks.acquire(&token).await;
        let result = self.delete(&token).await;
        drop(guard);
        self.locks.release_if_idle(&token);

        result?;
        info!(token = %token, "Removed session");
        Ok(())
    }

    /// Returns a snapshot of the whole session.
    pub async fn get_session(&self, token: &str) -> Result<Session, SessionError> {
        let token = SessionToken::parse(token)?;
        Ok(self.load(&token).await?.session)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn join_session(&self, token: &str, name: &str) -> Result<(), SessionError> {
        let token = SessionToken::parse(token)?;
        require_non_empty("name", name)?;

        self.mutate(&token, |session| session.join(name)).await?;
        debug!(token = %token, user = name, "User joined session");
        Ok(())
    }

    pub async fn leave_session(&self, token: &str, name: &str) -> Result<(), SessionError> {
        let token = SessionToken::parse(token)?;
        require_non_empty("name", name)?;

        self.mutate(&token, |session| session.leave(name)).await?;
        debug!(token = %token, user = name, "User left session");
        Ok(())
    }

    /// Returns the session's users in join order.
    pub async fn get_users(&self, token: &str) -> Result<Vec<String>, SessionError> {
        let token = SessionToken::parse(token)?;
        Ok(self.load(&token).await?.session.users().to_vec())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Work packages
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn add_work_package(
        &self,
        token: &str,
        id: &str,
        summary: Option<String>,
    ) -> Result<(), SessionError> {
        let token = SessionToken::parse(token)?;
        let work_package = WorkPackage::new(id, summary)?;

        self.mutate(&token, |session| session.add_work_package(work_package))
            .await?;
        debug!(token = %token, work_package = id, "Added work package");
        Ok(())
    }

    pub async fn remove_work_package(&self, token: &str, id: &str) -> Result<(), SessionError> {
        let token = SessionToken::parse(token)?;
        require_non_empty("id", id)?;

        self.mutate(&token, |session| session.remove_work_package(id))
            .await?;
        debug!(token = %token, work_package = id, "Removed work package");
        Ok(())
    }

    /// Sets the aggregate effort and standard deviation of a work package.
    pub async fn add_estimate_to_work_package(
        &self,
        token: &str,
        id: &str,
        effort: f64,
        standard_deviation: f64,
    ) -> Result<(), SessionError> {
        let token = SessionToken::parse(token)?;
        require_non_empty("id", id)?;
        validate_aggregate(effort, standard_deviation)?;

        self.mutate(&token, |session| {
            session.set_work_package_estimate(id, effort, standard_deviation)
        })
        .await?;
        debug!(token = %token, work_package = id, effort, standard_deviation, "Set work package estimate");
        Ok(())
    }

    /// Resets the aggregate estimate of a work package to zero.
    pub async fn remove_estimate_from_work_package(
        &self,
        token: &str,
        id: &str,
    ) -> Result<(), SessionError> {
        let token = SessionToken::parse(token)?;
        require_non_empty("id", id)?;

        self.mutate(&token, |session| session.clear_work_package_estimate(id))
            .await?;
        debug!(token = %token, work_package = id, "Cleared work package estimate");
        Ok(())
    }

    pub async fn get_work_packages(&self, token: &str) -> Result<Vec<WorkPackage>, SessionError> {
        let token = SessionToken::parse(token)?;
        Ok(self.load(&token).await?.session.work_packages().to_vec())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Per-user estimates
    // ─────────────────────────────────────────────────────────────────────────

    /// Stores one user's raw estimate after validating the triple.
    pub async fn add_estimate(&self, token: &str, estimate: UserEstimate) -> Result<(), SessionError> {
        let token = SessionToken::parse(token)?;
        require_non_empty("work_package_id", &estimate.work_package_id)?;
        require_non_empty("user_name", &estimate.user_name)?;
        estimate.to_delphi()?;

        let work_package_id = estimate.work_package_id.clone();
        let user_name = estimate.user_name.clone();

        self.mutate(&token, |session| session.add_estimate(estimate))
            .await?;
        debug!(
            token = %token,
            work_package = %work_package_id,
            user = %user_name,
            "Added estimate"
        );
        Ok(())
    }

    /// Deletes the estimate keyed by `(work_package_id, user_name)`.
    pub async fn remove_estimate(
        &self,
        token: &str,
        work_package_id: &str,
        user_name: &str,
    ) -> Result<(), SessionError> {
        let token = SessionToken::parse(token)?;
        require_non_empty("work_package_id", work_package_id)?;
        require_non_empty("user_name", user_name)?;

        self.mutate(&token, |session| {
            session.remove_estimate(work_package_id, user_name)
        })
        .await?;
        debug!(token = %token, work_package = work_package_id, user = user_name, "Removed estimate");
        Ok(())
    }

    /// Returns all per-user estimates in insertion order.
    pub async fn get_estimates(&self, token: &str) -> Result<Vec<UserEstimate>, SessionError> {
        let token = SessionToken::parse(token)?;
        Ok(self.load(&token).await?.session.estimates().to_vec())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    async fn load(&self, token: &SessionToken) -> Result<StoredSession, SessionError> {
        self.store
            .find(token)
            .await?
            .ok_or(SessionError::SessionNotFound)
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), SessionError> {
        self.load(token).await?;
        if !self.store.delete(token).await? {
            return Err(SessionError::SessionNotFound);
        }
        Ok(())
    }

    /// Read-modify-write of one session under its lock.
    ///
    /// The lock entry is released afterwards unless another caller waits on
    /// it, so unknown tokens leave nothing behind.
    async fn mutate<F>(&self, token: &SessionToken, change: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut Session) -> Result<(), SessionError> + Send,
    {
        let guard = self.locks.acquire(token).await;
        let result = self.apply(token, change).await;
        drop(guard);
        self.locks.release_if_idle(token);
        result
    }

    async fn apply<F>(&self, token: &SessionToken, change: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut Session) -> Result<(), SessionError> + Send,
    {
        let StoredSession {
            mut session,
            revision,
        } = self.load(token).await?;

        change(&mut session)?;

        self.store.replace(&session, revision).await.map_err(|e| {
            warn!(token = %token, error = %e, "Failed to write session");
            SessionError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::estimation::EstimationError;
    use crate::domain::foundation::{ErrorKind, TokenError, ValidationError, TOKEN_LENGTH};
    use crate::ports::{RandomSourceError, StoreError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource(AtomicUsize);

    impl RandomSource for CountingSource {
        fn fill(&self, dest: &mut [u8]) -> Result<(), RandomSourceError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) as u8;
            dest.iter_mut().enumerate().for_each(|(i, b)| *b = n.wrapping_add(i as u8));
            Ok(())
        }
    }

    struct BrokenSource;

    impl RandomSource for BrokenSource {
        fn fill(&self, _dest: &mut [u8]) -> Result<(), RandomSourceError> {
            Err(RandomSourceError::new("no entropy"))
        }
    }

    /// Store that counts calls and can fail on demand.
    struct MockSessionStore {
        inner: InMemorySessionStore,
        calls: AtomicUsize,
        fail_schema: bool,
        fail_writes: bool,
    }

    impl MockSessionStore {
        fn new() -> Self {
            Self {
                inner: InMemorySessionStore::new(),
                calls: AtomicUsize::new(0),
                fail_schema: false,
                fail_writes: false,
            }
        }

        fn failing_schema() -> Self {
            Self {
                fail_schema: true,
                ..Self::new()
            }
        }

        fn failing_writes() -> Self {
            Self {
                fail_writes: true,
                ..Self::new()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn record(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SessionStore for MockSessionStore {
        async fn ensure_schema(&self) -> Result<(), StoreError> {
            if self.fail_schema {
                return Err(StoreError::Query("disk I/O error".to_string()));
            }
            Ok(())
        }

        async fn insert(&self, session: &Session) -> Result<(), StoreError> {
            self.record();
            if self.fail_writes {
                return Err(StoreError::Query("Simulated insert failure".to_string()));
            }
            self.inner.insert(session).await
        }

        async fn find(&self, token: &SessionToken) -> Result<Option<StoredSession>, StoreError> {
            self.record();
            self.inner.find(token).await
        }

        async fn replace(&self, session: &Session, expected_revision: u64) -> Result<(), StoreError> {
            self.record();
            if self.fail_writes {
                return Err(StoreError::Query("Simulated update failure".to_string()));
            }
            self.inner.replace(session, expected_revision).await
        }

        async fn delete(&self, token: &SessionToken) -> Result<bool, StoreError> {
            self.record();
            self.inner.delete(token).await
        }
    }

    async fn repository_with(store: Arc<dyn SessionStore>) -> SessionRepository {
        SessionRepository::new(store, Arc::new(CountingSource(AtomicUsize::new(0))))
            .await
            .unwrap()
    }

    async fn repository() -> SessionRepository {
        repository_with(Arc::new(InMemorySessionStore::new())).await
    }

    async fn scenario(repo: &SessionRepository) -> String {
        let token = repo.create_session().await.unwrap().to_string();
        repo.add_work_package(&token, "TEST01", None).await.unwrap();
        repo.add_work_package(&token, "TEST02", Some("some test".to_string()))
            .await
            .unwrap();
        repo.join_session(&token, "Tigger").await.unwrap();
        repo.join_session(&token, "Rabbit").await.unwrap();
        token
    }

    #[tokio::test]
    async fn new_fails_when_schema_cannot_be_created() {
        let result = SessionRepository::new(
            Arc::new(MockSessionStore::failing_schema()),
            Arc::new(BrokenSource),
        )
        .await;
        assert!(matches!(result, Err(SessionError::StoreInit(_))));
    }

    #[tokio::test]
    async fn create_session_returns_valid_token() {
        let repo = repository().await;
        let token = repo.create_session().await.unwrap();

        assert_eq!(token.as_str().len(), TOKEN_LENGTH);
        assert!(repo.get_users(token.as_str()).await.unwrap().is_empty());
        assert!(repo.get_work_packages(token.as_str()).await.unwrap().is_empty());
        assert!(repo.get_estimates(token.as_str()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_session_fails_without_entropy() {
        let repo = SessionRepository::new(Arc::new(InMemorySessionStore::new()), Arc::new(BrokenSource))
            .await
            .unwrap();
        let result = repo.create_session().await;
        assert!(matches!(
            result,
            Err(SessionError::TokenGeneration(TokenError::RandomSource(_)))
        ));
    }

    #[tokio::test]
    async fn create_session_surfaces_persist_failure() {
        let repo = repository_with(Arc::new(MockSessionStore::failing_writes())).await;
        let result = repo.create_session().await;
        assert!(matches!(result, Err(SessionError::Store(_))));
    }

    #[tokio::test]
    async fn join_twice_keeps_single_entry() {
        let repo = repository().await;
        let token = scenario(&repo).await;

        let result = repo.join_session(&token, "Tigger").await;
        assert_eq!(result, Err(SessionError::UserAlreadyJoined("Tigger".into())));

        let users = repo.get_users(&token).await.unwrap();
        assert_eq!(users, vec!["Tigger".to_string(), "Rabbit".to_string()]);
    }

    #[tokio::test]
    async fn leave_session_removes_user() {
        let repo = repository().await;
        let token = scenario(&repo).await;

        repo.leave_session(&token, "Tigger").await.unwrap();
        assert_eq!(repo.get_users(&token).await.unwrap(), vec!["Rabbit".to_string()]);

        let result = repo.leave_session(&token, "Tigger").await;
        assert_eq!(result, Err(SessionError::UserNotInSession("Tigger".into())));
    }

    #[tokio::test]
    async fn operations_on_unknown_session_fail() {
        let repo = repository().await;
        let token = "0".repeat(TOKEN_LENGTH);

        assert_eq!(
            repo.join_session(&token, "Tigger").await,
            Err(SessionError::SessionNotFound)
        );
        assert_eq!(repo.get_users(&token).await, Err(SessionError::SessionNotFound));
        assert_eq!(repo.remove_session(&token).await, Err(SessionError::SessionNotFound));
    }

    #[tokio::test]
    async fn malformed_token_never_reaches_store() {
        let store = Arc::new(MockSessionStore::new());
        let repo = repository_with(store.clone()).await;

        for result in [
            repo.get_users("12345").await.map(|_| ()),
            repo.get_work_packages("12345").await.map(|_| ()),
            repo.get_estimates("12345").await.map(|_| ()),
            repo.join_session("12345", "Tigger").await,
            repo.remove_session("12345").await,
        ] {
            assert_eq!(
                result,
                Err(SessionError::Validation(ValidationError::invalid_length(
                    "token",
                    TOKEN_LENGTH,
                    5
                )))
            );
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_store_access() {
        let store = Arc::new(MockSessionStore::new());
        let repo = repository_with(store.clone()).await;
        let token = "0".repeat(TOKEN_LENGTH);

        assert!(repo.join_session(&token, "").await.is_err());
        assert!(repo.add_work_package(&token, "", None).await.is_err());
        assert!(repo
            .add_estimate_to_work_package(&token, "TEST01", -1.0, 0.0)
            .await
            .is_err());
        assert!(repo
            .add_estimate(&token, UserEstimate::new("TEST01", "Tigger", 2.0, 1.0, 3.0))
            .await
            .is_err());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn work_packages_are_unique() {
        let repo = repository().await;
        let token = scenario(&repo).await;

        let result = repo.add_work_package(&token, "TEST01", None).await;
        assert_eq!(
            result,
            Err(SessionError::WorkPackageAlreadyExists("TEST01".into()))
        );

        let packages = repo.get_work_packages(&token).await.unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].summary(), None);
        assert_eq!(packages[1].summary(), Some("some test"));
    }

    #[tokio::test]
    async fn remove_work_package() {
        let repo = repository().await;
        let token = scenario(&repo).await;

        repo.remove_work_package(&token, "TEST01").await.unwrap();
        let packages = repo.get_work_packages(&token).await.unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].id(), "TEST02");

        assert_eq!(
            repo.remove_work_package(&token, "TEST01").await,
            Err(SessionError::WorkPackageNotFound("TEST01".into()))
        );
    }

    #[tokio::test]
    async fn clearing_work_package_estimate_resets_to_zero() {
        let repo = repository().await;
        let token = scenario(&repo).await;

        repo.add_estimate_to_work_package(&token, "TEST02", 3.5, 0.75)
            .await
            .unwrap();
        let packages = repo.get_work_packages(&token).await.unwrap();
        assert_eq!(packages[1].effort(), 3.5);
        assert_eq!(packages[1].standard_deviation(), 0.75);

        repo.remove_estimate_from_work_package(&token, "TEST02")
            .await
            .unwrap();
        let packages = repo.get_work_packages(&token).await.unwrap();
        assert_eq!(packages[1].effort(), 0.0);
        assert_eq!(packages[1].standard_deviation(), 0.0);
    }

    #[tokio::test]
    async fn work_package_estimate_requires_existing_package() {
        let repo = repository().await;
        let token = scenario(&repo).await;

        assert_eq!(
            repo.add_estimate_to_work_package(&token, "TEST99", 1.0, 0.1).await,
            Err(SessionError::WorkPackageNotFound("TEST99".into()))
        );
        assert_eq!(
            repo.add_estimate_to_work_package(&token, "TEST01", 1.0, -0.1).await,
            Err(SessionError::InvalidEstimate(
                EstimationError::NegativeStandardDeviation(-0.1)
            ))
        );
    }

    #[tokio::test]
    async fn estimates_are_kept_in_insertion_order() {
        let repo = repository().await;
        let token = scenario(&repo).await;

        let tigger = UserEstimate::new("TEST01", "Tigger", 0.5, 1.0, 2.0);
        let rabbit = UserEstimate::new("TEST01", "Rabbit", 1.0, 1.2, 2.0);
        repo.add_estimate(&token, tigger.clone()).await.unwrap();
        repo.add_estimate(&token, rabbit.clone()).await.unwrap();

        assert_eq!(repo.get_estimates(&token).await.unwrap(), vec![tigger, rabbit]);
    }

    #[tokio::test]
    async fn add_estimate_requires_membership() {
        let repo = repository().await;
        let token = repo.create_session().await.unwrap().to_string();
        let estimate = UserEstimate::new("TEST01", "Tigger", 0.5, 1.0, 2.0);

        let result = repo.add_estimate(&token, estimate.clone()).await;
        assert_eq!(result, Err(SessionError::UserNotInSession("Tigger".into())));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);

        repo.join_session(&token, "Tigger").await.unwrap();
        let result = repo.add_estimate(&token, estimate.clone()).await;
        assert_eq!(result, Err(SessionError::WorkPackageNotFound("TEST01".into())));

        repo.add_work_package(&token, "TEST01", None).await.unwrap();
        repo.add_estimate(&token, estimate).await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_estimate_is_rejected() {
        let repo = repository().await;
        let token = scenario(&repo).await;
        let estimate = UserEstimate::new("TEST01", "Tigger", 0.5, 1.0, 2.0);

        repo.add_estimate(&token, estimate.clone()).await.unwrap();
        let result = repo.add_estimate(&token, estimate).await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn remove_estimate_by_key() {
        let repo = repository().await;
        let token = scenario(&repo).await;
        repo.add_estimate(&token, UserEstimate::new("TEST01", "Tigger", 0.5, 1.0, 2.0))
            .await
            .unwrap();

        repo.remove_estimate(&token, "TEST01", "Tigger").await.unwrap();
        assert!(repo.get_estimates(&token).await.unwrap().is_empty());

        assert_eq!(
            repo.remove_estimate(&token, "TEST01", "Tigger").await,
            Err(SessionError::estimate_not_found("TEST01", "Tigger"))
        );
    }

    #[tokio::test]
    async fn remove_session_deletes_record() {
        let repo = repository().await;
        let token = scenario(&repo).await;

        repo.remove_session(&token).await.unwrap();
        assert_eq!(repo.get_users(&token).await, Err(SessionError::SessionNotFound));
        assert!(repo.locks.is_empty());
    }

    #[tokio::test]
    async fn unknown_tokens_leave_no_lock_entries() {
        let repo = repository().await;

        for i in 0..100 {
            let token = format!("{:032x}", i);
            assert_eq!(
                repo.join_session(&token, "Tigger").await,
                Err(SessionError::SessionNotFound)
            );
            assert_eq!(
                repo.remove_session(&token).await,
                Err(SessionError::SessionNotFound)
            );
        }
        assert!(repo.locks.is_empty());
    }

    #[tokio::test]
    async fn successful_mutations_release_lock_entries() {
        let repo = repository().await;
        let token = scenario(&repo).await;
        repo.leave_session(&token, "Rabbit").await.unwrap();
        assert!(repo.locks.is_empty());
    }

    #[tokio::test]
    async fn get_session_returns_consistent_snapshot() {
        let repo = repository().await;
        let token = scenario(&repo).await;
        repo.add_estimate(&token, UserEstimate::new("TEST01", "Tigger", 0.5, 1.0, 2.0))
            .await
            .unwrap();

        let session = repo.get_session(&token).await.unwrap();
        assert_eq!(session.token().as_str(), token);
        assert_eq!(session.users().len(), 2);
        assert_eq!(session.work_packages().len(), 2);
        assert_eq!(session.estimates().len(), 1);
    }

    #[tokio::test]
    async fn infinite_values_are_rejected_before_store_access() {
        let store = Arc::new(MockSessionStore::new());
        let repo = repository_with(store.clone()).await;
        let token = "0".repeat(TOKEN_LENGTH);

        let result = repo
            .add_estimate(&token, UserEstimate::new("TEST01", "Tigger", 0.0, 1.0, f64::INFINITY))
            .await;
        assert!(matches!(
            result,
            Err(SessionError::InvalidEstimate(EstimationError::NotFinite { .. }))
        ));

        let result = repo
            .add_estimate_to_work_package(&token, "TEST01", f64::INFINITY, 0.0)
            .await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn failed_write_leaves_session_unchanged() {
        let store = Arc::new(MockSessionStore::new());
        let repo = repository_with(store.clone()).await;
        let token = repo.create_session().await.unwrap();

        let failing = SessionRepository {
            store: Arc::new(MockSessionStore {
                inner: store.inner.clone(),
                ..MockSessionStore::failing_writes()
            }),
            random: Arc::new(BrokenSource),
            locks: SessionLocks::new(),
        };

        let result = failing.join_session(token.as_str(), "Tigger").await;
        assert!(matches!(result, Err(SessionError::Store(_))));
        assert!(repo.get_users(token.as_str()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_joins_are_not_lost() {
        let repo = Arc::new(repository().await);
        let token = repo.create_session().await.unwrap().to_string();

        let handles: Vec<_> = (0..25)
            .map(|i| {
                let repo = repo.clone();
                let token = token.clone();
                tokio::spawn(async move { repo.join_session(&token, &format!("user-{}", i)).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let users = repo.get_users(&token).await.unwrap();
        assert_eq!(users.len(), 25);
    }

    #[tokio::test]
    async fn stored_triple_round_trips_exactly() {
        let repo = repository().await;
        let token = scenario(&repo).await;
        let estimate = UserEstimate::new("TEST02", "Rabbit", 0.1, 0.30000000000000004, 1e-7 + 0.3);

        repo.add_estimate(&token, estimate.clone()).await.unwrap();
        let stored = repo.get_estimates(&token).await.unwrap();

        assert_eq!(stored[0].best_case.to_bits(), estimate.best_case.to_bits());
        assert_eq!(stored[0].most_likely_case.to_bits(), estimate.most_likely_case.to_bits());
        assert_eq!(stored[0].worst_case.to_bits(), estimate.worst_case.to_bits());
    }
}
