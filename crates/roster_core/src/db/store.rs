//! Relational store handle with per-operation connection scoping.

use super::{open_db, DbResult};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Handle to a SQLite-backed roster store.
///
/// The store keeps only the database path. Every operation opens its own
/// connection and releases it when the connection drops, so no handle
/// outlives the call that acquired it. Opening re-checks the schema, which
/// keeps initialization idempotent across any number of calls.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the store and ensures the schema exists.
    ///
    /// Existing rows are never touched; a database stamped with a newer
    /// schema version than this binary understands is refused.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref().to_path_buf();
        // Schema failures surface at open, not on the first create/list.
        drop(open_db(&path)?);
        Ok(Self { path })
    }

    /// Re-runs schema initialization. No-op when already current.
    pub fn init_schema(&self) -> DbResult<()> {
        drop(open_db(&self.path)?);
        Ok(())
    }

    /// Opens a fresh connection for one operation.
    pub(crate) fn connect(&self) -> DbResult<Connection> {
        open_db(&self.path)
    }
}
