//! User repository contract and shared error taxonomy.
//!
//! # Responsibility
//! - Define the single create/list contract both backends implement.
//! - Map store, encoding, and validation failures into one error type.
//!
//! # Invariants
//! - `create_user` either persists a fully-formed record or changes
//!   nothing.
//! - `list_users` materializes one consistent snapshot per call.
//! - No failure is retried here; every error propagates to the caller.

use crate::db::DbError;
use crate::kv::KvError;
use crate::model::user::{NewUser, User, UserValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure surface for user persistence and scan operations.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before any write was attempted.
    Validation(UserValidationError),
    /// Relational backend unreachable or transaction failure.
    Db(DbError),
    /// Key-value backend unreachable or transaction failure.
    Kv(KvError),
    /// Record could not be encoded for storage.
    Encode(serde_json::Error),
    /// Persisted entry could not be decoded or violates record invariants.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Kv(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "could not encode user record: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Kv(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<redb::TableError> for RepoError {
    fn from(value: redb::TableError) -> Self {
        Self::Kv(value.into())
    }
}

impl From<redb::StorageError> for RepoError {
    fn from(value: redb::StorageError) -> Self {
        Self::Kv(value.into())
    }
}

impl From<redb::CommitError> for RepoError {
    fn from(value: redb::CommitError) -> Self {
        Self::Kv(value.into())
    }
}

/// Backend-agnostic persistence contract for user records.
///
/// Implementations commit to one identity strategy at construction time;
/// call sites stay oblivious to which backend is underneath.
pub trait UserRepository {
    /// Persists a new record and returns it with its assigned id.
    fn create_user(&self, new_user: &NewUser) -> RepoResult<User>;

    /// Returns every stored record from one consistent snapshot.
    ///
    /// Iteration order is ascending key order for the key-value backend
    /// and unspecified for the relational backend.
    fn list_users(&self) -> RepoResult<Vec<User>>;
}
