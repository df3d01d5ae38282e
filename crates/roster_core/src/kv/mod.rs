//! Ordered key-value storage bootstrap and transaction entry points.
//!
//! # Responsibility
//! - Open and initialize the embedded key-value database (redb).
//! - Expose scoped read/write transactions to the repository layer.
//!
//! # Invariants
//! - At most one write transaction is active at a time (engine-enforced).
//! - Read transactions observe a fixed snapshot as of their start.
//! - Schema initialization is idempotent and never truncates data.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod store;

pub use store::KvStore;
pub(crate) use store::USERS_TABLE;

pub type KvResult<T> = Result<T, KvError>;

#[derive(Debug)]
pub enum KvError {
    Redb(redb::Error),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Redb(err) => write!(f, "{err}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Redb(err) => Some(err),
        }
    }
}

impl From<redb::DatabaseError> for KvError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Redb(value.into())
    }
}

impl From<redb::TransactionError> for KvError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Redb(value.into())
    }
}

impl From<redb::TableError> for KvError {
    fn from(value: redb::TableError) -> Self {
        Self::Redb(value.into())
    }
}

impl From<redb::StorageError> for KvError {
    fn from(value: redb::StorageError) -> Self {
        Self::Redb(value.into())
    }
}

impl From<redb::CommitError> for KvError {
    fn from(value: redb::CommitError) -> Self {
        Self::Redb(value.into())
    }
}
