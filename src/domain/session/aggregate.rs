//! Session aggregate entity.
//!
//! A session is one flat document: its token, the users who joined, the
//! work packages under estimation and every per-user estimate.
//!
//! # Invariants
//!
//! - `users` contains no duplicates and keeps insertion order
//! - work package IDs are unique within the session
//! - `(work_package_id, user_name)` is unique among `estimates`
//! - an estimate references a joined user and an existing work package
//! - every stored estimate satisfies `0 <= best <= most_likely <= worst`

use serde::{Deserialize, Serialize};

use super::{SessionError, WorkPackage};
use crate::domain::estimation::UserEstimate;
use crate::domain::foundation::{require_non_empty, SessionToken};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: SessionToken,
    #[serde(default)]
    users: Vec<String>,
    #[serde(default)]
    work_packages: Vec<WorkPackage>,
    #[serde(default)]
    estimates: Vec<UserEstimate>,
}

impl Session {
    /// Create an empty session.
    pub fn new(token: SessionToken) -> Self {
        Self {
            token,
            users: Vec::new(),
            work_packages: Vec::new(),
            estimates: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn work_packages(&self) -> &[WorkPackage] {
        &self.work_packages
    }

    pub fn estimates(&self) -> &[UserEstimate] {
        &self.estimates
    }

    pub fn has_user(&self, name: &str) -> bool {
        self.users.iter().any(|u| u == name)
    }

    pub fn has_work_package(&self, id: &str) -> bool {
        self.work_packages.iter().any(|wp| wp.id() == id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a user to the session.
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is empty
    /// - `UserAlreadyJoined` if the name is already taken
    pub fn join(&mut self, name: &str) -> Result<(), SessionError> {
        require_non_empty("name", name)?;
        if self.has_user(name) {
            return Err(SessionError::UserAlreadyJoined(name.to_string()));
        }
        self.users.push(name.to_string());
        Ok(())
    }

    /// Removes a user from the session. Their estimates are kept.
    pub fn leave(&mut self, name: &str) -> Result<(), SessionError> {
        require_non_empty("name", name)?;
        let index = self
            .users
            .iter()
            .position(|u| u == name)
            .ok_or_else(|| SessionError::UserNotInSession(name.to_string()))?;
        self.users.remove(index);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Work packages
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_work_package(&mut self, work_package: WorkPackage) -> Result<(), SessionError> {
        if self.has_work_package(work_package.id()) {
            return Err(SessionError::WorkPackageAlreadyExists(
                work_package.id().to_string(),
            ));
        }
        self.work_packages.push(work_package);
        Ok(())
    }

    /// Removes a work package. Per-user estimates referencing it are kept.
    pub fn remove_work_package(&mut self, id: &str) -> Result<(), SessionError> {
        require_non_empty("id", id)?;
        let index = self
            .work_packages
            .iter()
            .position(|wp| wp.id() == id)
            .ok_or_else(|| SessionError::WorkPackageNotFound(id.to_string()))?;
        self.work_packages.remove(index);
        Ok(())
    }

    /// Sets the aggregate effort and standard deviation of one work package.
    pub fn set_work_package_estimate(
        &mut self,
        id: &str,
        effort: f64,
        standard_deviation: f64,
    ) -> Result<(), SessionError> {
        self.work_package_mut(id)?
            .set_estimate(effort, standard_deviation)?;
        Ok(())
    }

    /// Resets the aggregate estimate of one work package to zero.
    pub fn clear_work_package_estimate(&mut self, id: &str) -> Result<(), SessionError> {
        self.work_package_mut(id)?.clear_estimate();
        Ok(())
    }

    fn work_package_mut(&mut self, id: &str) -> Result<&mut WorkPackage, SessionError> {
        require_non_empty("id", id)?;
        self.work_packages
            .iter_mut()
            .find(|wp| wp.id() == id)
            .ok_or_else(|| SessionError::WorkPackageNotFound(id.to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Per-user estimates
    // ─────────────────────────────────────────────────────────────────────────

    /// Records one user's estimate for one work package.
    ///
    /// # Errors
    ///
    /// - `Validation` / `InvalidEstimate` for malformed input
    /// - `UserNotInSession` if the user has not joined
    /// - `WorkPackageNotFound` if the work package does not exist
    /// - `EstimateAlreadyExists` if the user already estimated it
    pub fn add_estimate(&mut self, estimate: UserEstimate) -> Result<(), SessionError> {
        require_non_empty("work_package_id", &estimate.work_package_id)?;
        require_non_empty("user_name", &estimate.user_name)?;
        estimate.to_delphi()?;

        if !self.has_user(&estimate.user_name) {
            return Err(SessionError::UserNotInSession(estimate.user_name));
        }
        if !self.has_work_package(&estimate.work_package_id) {
            return Err(SessionError::WorkPackageNotFound(estimate.work_package_id));
        }
        if self
            .estimates
            .iter()
            .any(|e| e.is_keyed_by(&estimate.work_package_id, &estimate.user_name))
        {
            return Err(SessionError::estimate_already_exists(
                estimate.work_package_id,
                estimate.user_name,
            ));
        }

        self.estimates.push(estimate);
        Ok(())
    }

    /// Deletes the estimate with the given natural key.
    pub fn remove_estimate(
        &mut self,
        work_package_id: &str,
        user_name: &str,
    ) -> Result<(), SessionError> {
        require_non_empty("work_package_id", work_package_id)?;
        require_non_empty("user_name", user_name)?;

        let index = self
            .estimates
            .iter()
            .position(|e| e.is_keyed_by(work_package_id, user_name))
            .ok_or_else(|| SessionError::estimate_not_found(work_package_id, user_name))?;
        self.estimates.remove(index);
        Ok(())
    }
}
