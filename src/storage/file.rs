use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

/// A single JSON object file holding every key of one profile.
///
/// Each `set` or `remove` rewrites the whole file through a sibling temp file
/// that is synced to disk before the rename, so a crash mid-write leaves the
/// previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Profile file malformed, starting empty");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        // Atomic write: write to tmp, fsync, rename
        let tmp = self.path.with_extension("tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&serde_json::to_vec_pretty(entries)?)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        // Persist the rename itself; not every platform can open a directory.
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
        debug!(path = %self.path.display(), keys = entries.len(), "Profile file written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let store = JsonFileStore::new(&path);
        store.set("cart", "[]".to_string()).unwrap();
        store.set("orders", "[1]".to_string()).unwrap();
        drop(store);

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("orders").unwrap().as_deref(), Some("[1]"));
        assert_eq!(reopened.get("restaurants").unwrap(), None);
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("profile.json"));
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[]".to_string()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "garbage").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[]".to_string()).unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let store = JsonFileStore::new(&path);
        store.set("cart", "[]".to_string()).unwrap();
        store.set("orders", "[]".to_string()).unwrap();

        assert!(!path.with_extension("tmp").exists());
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["profile.json".to_string()]);

        let on_disk: BTreeMap<String, String> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 2);
        assert_eq!(on_disk["orders"], "[]");
    }

    #[test]
    fn test_remove_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("profile.json"));
        store.set("cart", "[]".to_string()).unwrap();
        store.remove("cart").unwrap();
        store.remove("never-set").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }
}
