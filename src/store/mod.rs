//! Employee store: in-memory state, reducer, snapshots and persistence.

pub mod persisted;
pub mod snapshot;
pub mod state;
pub mod storage;

pub use persisted::{BACKUP_KEY, LoadStatus, PersistedStore, ROOT_KEY};
pub use snapshot::{SnapshotLoadResult, load_snapshot, save_snapshot};
pub use state::{Action, EmployeeStore, Mutation};
pub use storage::{FileStorage, MemoryStorage, Storage};
