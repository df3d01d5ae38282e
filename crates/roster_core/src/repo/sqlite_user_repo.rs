//! SQLite implementation of the user repository.
//!
//! # Responsibility
//! - Persist and scan user rows through per-operation connections.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Identity is store-assigned: the inserted rowid becomes the record id.
//! - The full-table scan applies no ORDER BY; callers must not rely on
//!   row order from this backend.

use crate::db::SqliteStore;
use crate::model::user::{NewUser, User, UserId};
use crate::repo::user_repo::{RepoError, RepoResult, UserRepository};
use rusqlite::{params, Row};

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'s> {
    store: &'s SqliteStore,
}

impl<'s> SqliteUserRepository<'s> {
    pub fn new(store: &'s SqliteStore) -> Self {
        Self { store }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, new_user: &NewUser) -> RepoResult<User> {
        new_user.validate()?;

        let conn = self.store.connect()?;
        conn.execute(
            "INSERT INTO users (first_name, last_name) VALUES (?1, ?2);",
            params![new_user.first_name.as_str(), new_user.last_name.as_str()],
        )?;

        Ok(User {
            id: UserId::Rowid(conn.last_insert_rowid()),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
        })
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare("SELECT id, first_name, last_name FROM users;")?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let user = User {
        id: UserId::Rowid(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
    };

    user.validate().map_err(|err| {
        RepoError::InvalidData(format!("row {} in users: {err}", user.id))
    })?;

    Ok(user)
}
