use redb::{Database, ReadableTable, TableDefinition};
use roster_core::{
    KvStore, KvUserRepository, NewUser, RepoError, User, UserId, UserRepository, UserService,
    UserValidationError,
};
use std::collections::HashSet;
use std::path::PathBuf;
use tempfile::TempDir;

// Mirrors the container the store manages, for planting raw entries.
const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("roster.redb")
}

#[test]
fn create_and_list_roundtrip() {
    let store = KvStore::open_in_memory().unwrap();
    let repo = KvUserRepository::new(&store);

    let created = repo.create_user(&NewUser::new("Ada", "Lovelace")).unwrap();
    assert!(matches!(created.id, UserId::Key(uuid) if !uuid.is_nil()));
    assert_eq!(created.first_name, "Ada");
    assert_eq!(created.last_name, "Lovelace");

    let users = repo.list_users().unwrap();
    assert_eq!(users, vec![created]);
}

#[test]
fn generated_ids_are_unique() {
    let store = KvStore::open_in_memory().unwrap();
    let repo = KvUserRepository::new(&store);

    for index in 0..10 {
        repo.create_user(&NewUser::new(format!("First{index}"), format!("Last{index}")))
            .unwrap();
    }

    let ids: HashSet<String> = repo
        .list_users()
        .unwrap()
        .into_iter()
        .map(|user| user.id.to_string())
        .collect();
    assert_eq!(ids.len(), 10);
}

#[test]
fn create_rejects_empty_fields_without_writing() {
    let store = KvStore::open_in_memory().unwrap();
    let repo = KvUserRepository::new(&store);

    let err = repo.create_user(&NewUser::new("", "Doe")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(UserValidationError::EmptyFirstName)
    ));

    let err = repo.create_user(&NewUser::new("Jane", "  ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(UserValidationError::EmptyLastName)
    ));

    assert!(repo.list_users().unwrap().is_empty());
}

#[test]
fn list_on_fresh_store_is_empty() {
    let store = KvStore::open_in_memory().unwrap();
    let repo = KvUserRepository::new(&store);

    assert_eq!(repo.list_users().unwrap(), vec![]);
}

#[test]
fn list_returns_ascending_key_order() {
    let store = KvStore::open_in_memory().unwrap();
    let repo = KvUserRepository::new(&store);

    for index in 0..5 {
        repo.create_user(&NewUser::new(format!("First{index}"), format!("Last{index}")))
            .unwrap();
    }

    let keys: Vec<String> = repo
        .list_users()
        .unwrap()
        .iter()
        .map(|user| user.id.to_string())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn init_schema_is_idempotent_and_preserves_entries() {
    let store = KvStore::open_in_memory().unwrap();
    let repo = KvUserRepository::new(&store);

    let created = repo.create_user(&NewUser::new("Ada", "Lovelace")).unwrap();

    for _ in 0..3 {
        store.init_schema().unwrap();
    }

    assert_eq!(repo.list_users().unwrap(), vec![created]);
}

#[test]
fn separate_stores_are_isolated() {
    let store_a = KvStore::open_in_memory().unwrap();
    let store_b = KvStore::open_in_memory().unwrap();

    KvUserRepository::new(&store_a)
        .create_user(&NewUser::new("Ada", "Lovelace"))
        .unwrap();

    assert!(KvUserRepository::new(&store_b)
        .list_users()
        .unwrap()
        .is_empty());
}

#[test]
fn reopening_store_preserves_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir);

    let created = {
        let store = KvStore::open(&path).unwrap();
        let repo = KvUserRepository::new(&store);
        repo.create_user(&NewUser::new("Grace", "Hopper")).unwrap()
    };

    let store = KvStore::open(&path).unwrap();
    let repo = KvUserRepository::new(&store);
    assert_eq!(repo.list_users().unwrap(), vec![created]);
}

#[test]
fn persisted_payload_roundtrips_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir);

    let created = {
        let store = KvStore::open(&path).unwrap();
        let repo = KvUserRepository::new(&store);
        repo.create_user(&NewUser::new("Ada", "Lovelace")).unwrap()
    };

    // Read the raw stored bytes back without going through the repository.
    let db = Database::create(&path).unwrap();
    let txn = db.begin_read().unwrap();
    let table = txn.open_table(USERS).unwrap();
    let value = table
        .get(created.id.to_string().as_str())
        .unwrap()
        .expect("created entry must exist under its id key");

    let decoded: User = serde_json::from_slice(value.value()).unwrap();
    assert_eq!(decoded, created);
}

#[test]
fn corrupted_payload_aborts_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir);

    {
        let store = KvStore::open(&path).unwrap();
        KvUserRepository::new(&store)
            .create_user(&NewUser::new("Ada", "Lovelace"))
            .unwrap();
    }

    // Plant garbage bytes directly in the table.
    {
        let db = Database::create(&path).unwrap();
        let txn = db.begin_write().unwrap();
        {
            let mut table = txn.open_table(USERS).unwrap();
            table.insert("zzzz-corrupt", b"not json".as_slice()).unwrap();
        }
        txn.commit().unwrap();
    }

    let store = KvStore::open(&path).unwrap();
    let err = KvUserRepository::new(&store).list_users().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn key_and_payload_id_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir);

    drop(KvStore::open(&path).unwrap());

    let stray = User {
        id: UserId::Key(uuid::Uuid::new_v4()),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
    };
    let payload = serde_json::to_vec(&stray).unwrap();

    {
        let db = Database::create(&path).unwrap();
        let txn = db.begin_write().unwrap();
        {
            let mut table = txn.open_table(USERS).unwrap();
            table.insert("not-the-id", payload.as_slice()).unwrap();
        }
        txn.commit().unwrap();
    }

    let store = KvStore::open(&path).unwrap();
    let err = KvUserRepository::new(&store).list_users().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("does not match")));
}

#[test]
fn service_create_then_list_returns_exactly_that_record() {
    let store = KvStore::open_in_memory().unwrap();
    let service = UserService::new(KvUserRepository::new(&store));

    let created = service.create_user("Ada", "Lovelace").unwrap();
    let users = service.list_users().unwrap();

    assert_eq!(users, vec![created]);
}
