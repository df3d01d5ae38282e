//! User use-case service.
//!
//! # Responsibility
//! - Provide the create/list caller contract over any repository backend.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or transaction
//!   discipline.
//! - The service layer remains storage-agnostic.

use crate::model::user::{NewUser, User};
use crate::repo::user_repo::{RepoResult, UserRepository};

/// Use-case service wrapper for user record operations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a user from raw name fields.
    ///
    /// # Contract
    /// - Empty or whitespace-only fields are rejected before any write.
    /// - Returns the persisted record including its assigned id.
    pub fn create_user(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> RepoResult<User> {
        let new_user = NewUser::new(first_name, last_name);
        self.repo.create_user(&new_user)
    }

    /// Lists every stored user from one consistent snapshot.
    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.repo.list_users()
    }
}
