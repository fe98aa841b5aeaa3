//! Employee store bound to durable storage.
//!
//! Every state-changing dispatch is followed by a snapshot write under
//! [`ROOT_KEY`]; opening the store reads that snapshot back. A snapshot that
//! cannot be decoded is copied to [`BACKUP_KEY`] before it can be overwritten.

use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::models::employee::EmployeeRecord;

use super::snapshot::{SnapshotLoadResult, load_snapshot, save_snapshot};
use super::state::{Action, EmployeeStore, Mutation};
use super::storage::Storage;

/// Fixed key of the persisted snapshot.
pub const ROOT_KEY: &str = "persist:root";

/// Key holding the last snapshot that failed to decode.
pub const BACKUP_KEY: &str = "persist:root:bak";

/// How the store was rehydrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Records restored from a snapshot.
    Restored { count: usize },
    /// No snapshot existed.
    Empty,
    /// Snapshot unreadable, started empty.
    Recovered { reason: String },
}

/// Employee store with persistence attached.
pub struct PersistedStore<S: Storage> {
    store: EmployeeStore,
    storage: S,
    load_status: LoadStatus,
}

impl<S: Storage> PersistedStore<S> {
    /// Rehydrate from `storage`.
    ///
    /// Never fails: an absent or unreadable snapshot yields an empty store,
    /// and the reason is kept in [`PersistedStore::load_status`].
    pub fn open(mut storage: S) -> Self {
        let (result, bytes) = match storage.read(ROOT_KEY) {
            Ok(bytes) => (load_snapshot(bytes.as_deref()), bytes),
            Err(e) => (
                SnapshotLoadResult::Invalid(AppError::PersistedStateUnreadable(e.to_string())),
                None,
            ),
        };

        let load_status = match &result {
            SnapshotLoadResult::Loaded(store) => {
                info!("Restored {} employees from storage", store.len());
                LoadStatus::Restored { count: store.len() }
            }
            SnapshotLoadResult::Missing => {
                info!("No persisted employees, starting empty");
                LoadStatus::Empty
            }
            SnapshotLoadResult::Invalid(e) => {
                warn!("Discarding persisted employees: {}", e);
                if let Some(bytes) = &bytes {
                    match storage.write(BACKUP_KEY, bytes) {
                        Ok(()) => info!("Kept unreadable snapshot under {}", BACKUP_KEY),
                        Err(e) => error!("Failed to back up unreadable snapshot: {}", e),
                    }
                }
                LoadStatus::Recovered { reason: e.to_string() }
            }
        };

        Self {
            store: result.into_store(),
            storage,
            load_status,
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Apply an action and persist if it changed the state.
    ///
    /// A failed write is returned, but the in-memory change is kept.
    pub fn dispatch(&mut self, action: Action) -> Result<Mutation> {
        let mutation = self.store.dispatch(action);
        if mutation == Mutation::Changed {
            self.persist()?;
        }
        Ok(mutation)
    }

    /// Append a record and persist.
    pub fn append(&mut self, record: EmployeeRecord) -> Result<()> {
        self.dispatch(Action::AddEmployee(record)).map(|_| ())
    }

    /// All records in insertion order.
    pub fn select_all(&self) -> &[EmployeeRecord] {
        self.store.select_all()
    }

    /// Remove the persisted snapshot and empty the store.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(ROOT_KEY)?;
        self.store = EmployeeStore::new();
        info!("Cleared persisted employees");
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        let bytes = save_snapshot(&self.store)?;
        if let Err(e) = self.storage.write(ROOT_KEY, &bytes) {
            error!("Failed to persist employees: {}", e);
            return Err(e.into());
        }
        debug!("Persisted {} employees ({} bytes)", self.store.len(), bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::models::employee::NewEmployee;
    use crate::store::storage::{FileStorage, MemoryStorage};

    fn record(city: &str) -> EmployeeRecord {
        EmployeeRecord::create(NewEmployee {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            birth_date: "2000-05-24T00:00:00Z".to_string(),
            start_date: "2010-08-01T00:00:00Z".to_string(),
            street: "123 Test Bvd".to_string(),
            city: city.to_string(),
            state: "CO".to_string(),
            zip_code: "80014".to_string(),
            department: "Sales".to_string(),
        })
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn read(&self, _key: &str) -> io::Result<Option<Vec<u8>>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _bytes: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }

        fn remove(&mut self, _key: &str) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_open_empty_storage() {
        let store = PersistedStore::open(MemoryStorage::new());
        assert_eq!(store.load_status(), &LoadStatus::Empty);
        assert!(store.select_all().is_empty());
    }

    #[test]
    fn test_append_writes_snapshot() {
        let mut store = PersistedStore::open(MemoryStorage::new());
        let employee = record("Denver");
        store.append(employee.clone()).unwrap();

        assert_eq!(store.select_all(), &[employee.clone()]);
        let bytes = store.storage.get(ROOT_KEY).unwrap();
        match load_snapshot(Some(bytes)) {
            SnapshotLoadResult::Loaded(saved) => assert_eq!(saved.select_all(), &[employee]),
            other => panic!("expected loaded snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_action_does_not_write() {
        let mut store = PersistedStore::open(MemoryStorage::new());
        assert_eq!(store.dispatch(Action::Unknown).unwrap(), Mutation::Unchanged);
        assert!(store.storage.get(ROOT_KEY).is_none());
    }

    #[test]
    fn test_corrupt_snapshot_recovers_empty() {
        let store = PersistedStore::open(MemoryStorage::with_blob(ROOT_KEY, "not json"));
        assert!(matches!(store.load_status(), LoadStatus::Recovered { .. }));
        assert!(store.select_all().is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_is_backed_up_before_overwrite() {
        let mut store = PersistedStore::open(MemoryStorage::with_blob(ROOT_KEY, "not json"));
        store.append(record("Denver")).unwrap();

        assert_eq!(store.storage.get(BACKUP_KEY), Some(b"not json".as_slice()));
        let saved = store.storage.get(ROOT_KEY).unwrap();
        assert!(matches!(load_snapshot(Some(saved)), SnapshotLoadResult::Loaded(_)));
    }

    #[test]
    fn test_corrupt_snapshot_backup_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.write(ROOT_KEY, b"{\"employees\": [").unwrap();

        let mut store = PersistedStore::open(storage.clone());
        store.append(record("Denver")).unwrap();

        assert_eq!(
            storage.read(BACKUP_KEY).unwrap().as_deref(),
            Some(b"{\"employees\": [".as_slice())
        );
        assert!(storage.path_for(BACKUP_KEY).ends_with("persist_root_bak.json"));
    }

    #[test]
    fn test_missing_snapshot_has_no_backup() {
        let store = PersistedStore::open(MemoryStorage::with_blob(ROOT_KEY, "  \n"));
        assert_eq!(store.load_status(), &LoadStatus::Empty);
        assert!(store.storage.get(BACKUP_KEY).is_none());
    }

    #[test]
    fn test_survives_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let first = record("Denver");
        let second = record("Boulder");

        {
            let mut store = PersistedStore::open(FileStorage::new(dir.path()));
            store.append(first.clone()).unwrap();
            store.append(second.clone()).unwrap();
        }

        let reopened = PersistedStore::open(FileStorage::new(dir.path()));
        assert_eq!(reopened.load_status(), &LoadStatus::Restored { count: 2 });
        assert_eq!(reopened.select_all(), &[first, second]);
    }

    #[test]
    fn test_failed_write_keeps_in_memory_append() {
        let mut store = PersistedStore::open(ReadOnlyStorage);
        let result = store.append(record("Denver"));
        assert!(matches!(result, Err(AppError::Io(_))));
        assert_eq!(store.select_all().len(), 1);
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let mut store = PersistedStore::open(MemoryStorage::new());
        store.append(record("Denver")).unwrap();
        store.clear().unwrap();

        assert!(store.select_all().is_empty());
        assert!(store.storage.get(ROOT_KEY).is_none());
    }
}
