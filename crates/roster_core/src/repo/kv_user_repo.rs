//! Key-value implementation of the user repository.
//!
//! # Responsibility
//! - Persist user records as JSON payloads keyed by their id string.
//! - Scan the record table from one snapshot read transaction.
//!
//! # Invariants
//! - Identity is client-generated: a fresh UUID is assigned before the
//!   write transaction begins.
//! - Each create performs exactly one write transaction; a failure before
//!   commit leaves the table untouched.
//! - Scans surface entries in ascending key order.

use crate::kv::{KvStore, USERS_TABLE};
use crate::model::user::{NewUser, User, UserId};
use crate::repo::user_repo::{RepoError, RepoResult, UserRepository};
use redb::ReadableTable;
use uuid::Uuid;

/// redb-backed user repository.
pub struct KvUserRepository<'s> {
    store: &'s KvStore,
}

impl<'s> KvUserRepository<'s> {
    pub fn new(store: &'s KvStore) -> Self {
        Self { store }
    }
}

impl UserRepository for KvUserRepository<'_> {
    fn create_user(&self, new_user: &NewUser) -> RepoResult<User> {
        new_user.validate()?;

        let user = User {
            id: UserId::Key(Uuid::new_v4()),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
        };
        let payload = serde_json::to_vec(&user).map_err(RepoError::Encode)?;

        // Dropping the transaction without commit rolls it back, so any
        // failure below leaves the table as it was.
        let txn = self.store.begin_write()?;
        {
            let mut table = txn.open_table(USERS_TABLE)?;
            table.insert(user.id.to_string().as_str(), payload.as_slice())?;
        }
        txn.commit()?;

        Ok(user)
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(USERS_TABLE)?;
        let mut users = Vec::new();

        for entry in table.iter()? {
            let (key, value) = entry?;
            users.push(decode_user(key.value(), value.value())?);
        }

        Ok(users)
    }
}

fn decode_user(key: &str, payload: &[u8]) -> RepoResult<User> {
    let user: User = serde_json::from_slice(payload).map_err(|err| {
        RepoError::InvalidData(format!("could not decode payload for key `{key}`: {err}"))
    })?;

    if user.id.to_string() != key {
        return Err(RepoError::InvalidData(format!(
            "key `{key}` does not match payload id `{}`",
            user.id
        )));
    }

    user.validate()
        .map_err(|err| RepoError::InvalidData(format!("entry `{key}` in users: {err}")))?;

    Ok(user)
}
