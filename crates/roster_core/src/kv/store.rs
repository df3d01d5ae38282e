//! Embedded key-value store handle (redb).

use super::{KvError, KvResult};
use log::{error, info};
use redb::backends::InMemoryBackend;
use redb::{Database, ReadTransaction, TableDefinition, WriteTransaction};
use std::path::Path;
use std::time::Instant;

/// Container for user records, keyed by the record id string.
pub(crate) const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Handle to a redb-backed roster store.
///
/// The engine serializes writers (one write transaction at a time) and
/// gives every read transaction a consistent snapshot taken at its start,
/// unaffected by concurrent commits. A transaction dropped without commit
/// is rolled back, so every exit path releases its scope.
pub struct KvStore {
    db: Database,
}

impl KvStore {
    /// Opens (creating if needed) the store file and ensures the `users`
    /// table exists.
    ///
    /// # Side effects
    /// - Emits `kv_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        let started_at = Instant::now();
        info!("event=kv_open module=kv status=start mode=file");

        let result = Database::create(path)
            .map_err(KvError::from)
            .map(|db| Self { db })
            .and_then(|store| store.init_schema().map(|()| store));

        match &result {
            Ok(_) => info!(
                "event=kv_open module=kv status=ok mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=kv_open module=kv status=error mode=file duration_ms={} error_code=kv_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }

    /// Opens a store backed by process memory, for tests.
    pub fn open_in_memory() -> KvResult<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        let store = Self { db };
        store.init_schema()?;
        Ok(store)
    }

    /// Creates the record table if absent; a committed no-op otherwise.
    ///
    /// Safe to call any number of times. Existing entries are never
    /// touched.
    pub fn init_schema(&self) -> KvResult<()> {
        let txn = self.db.begin_write()?;
        {
            let _table = txn.open_table(USERS_TABLE)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Begins a snapshot read transaction.
    pub(crate) fn begin_read(&self) -> KvResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    /// Begins the single write transaction, blocking while another writer
    /// is in flight.
    pub(crate) fn begin_write(&self) -> KvResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }
}
