//! Keyed blob storage backing the persisted store.

use std::collections::HashMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::PathBuf;

/// Keyed byte storage.
pub trait Storage {
    /// Read the blob stored under `key`, if any.
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Replace the blob stored under `key`.
    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()>;

    /// Remove the blob stored under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// One JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`; characters unsafe in file names become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        // Write then rename so a crash never leaves a half-written snapshot.
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory storage, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one blob.
    pub fn with_blob(key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let mut storage = Self::new();
        storage.blobs.insert(key.to_string(), bytes.into());
        storage
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.blobs.get(key).map(Vec::as_slice)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_sanitizes_key() {
        let storage = FileStorage::new("/data");
        assert_eq!(storage.path_for("persist:root"), PathBuf::from("/data/persist_root.json"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.read("persist:root").unwrap(), None);

        storage.write("persist:root", b"{\"employees\":[]}").unwrap();
        assert_eq!(
            storage.read("persist:root").unwrap().as_deref(),
            Some(b"{\"employees\":[]}".as_slice())
        );
        assert!(!storage.path_for("persist:root").with_extension("json.tmp").exists());

        storage.remove("persist:root").unwrap();
        assert_eq!(storage.read("persist:root").unwrap(), None);
        storage.remove("persist:root").unwrap();
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::with_blob("a", "1");
        assert_eq!(storage.get("a"), Some(b"1".as_slice()));
        storage.write("a", b"2").unwrap();
        assert_eq!(storage.read("a").unwrap(), Some(b"2".to_vec()));
        storage.remove("a").unwrap();
        assert_eq!(storage.get("a"), None);
    }
}
