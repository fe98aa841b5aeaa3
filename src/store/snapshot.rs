//! Snapshot encoding of the employee store.

use crate::error::{AppError, Result};

use super::state::EmployeeStore;

/// Snapshot load result.
#[derive(Debug)]
pub enum SnapshotLoadResult {
    /// Snapshot decoded.
    Loaded(EmployeeStore),
    /// No snapshot persisted yet.
    Missing,
    /// Snapshot present but unreadable.
    Invalid(AppError),
}

impl SnapshotLoadResult {
    /// The rehydrated store, or an empty one when nothing usable was found.
    pub fn into_store(self) -> EmployeeStore {
        match self {
            SnapshotLoadResult::Loaded(store) => store,
            SnapshotLoadResult::Missing | SnapshotLoadResult::Invalid(_) => EmployeeStore::new(),
        }
    }
}

/// Decode persisted snapshot bytes.
pub fn load_snapshot(bytes: Option<&[u8]>) -> SnapshotLoadResult {
    let Some(bytes) = bytes else {
        return SnapshotLoadResult::Missing;
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return SnapshotLoadResult::Missing;
    }

    match serde_json::from_slice::<EmployeeStore>(bytes) {
        Ok(store) => SnapshotLoadResult::Loaded(store),
        Err(e) => SnapshotLoadResult::Invalid(AppError::PersistedStateUnreadable(e.to_string())),
    }
}

/// Encode the store for persistence.
pub fn save_snapshot(store: &EmployeeStore) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(store)?)
}
