use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const STORAGE_FILE: &str = "local_storage.json";

/// File-backed string key/value store, the console's equivalent of browser
/// local storage.
pub struct LocalStorage {
    file_path: PathBuf,
}

impl LocalStorage {
    /// Open the store inside `state_dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(state_dir: P) -> Result<Self> {
        let state_dir = state_dir.as_ref();
        fs::create_dir_all(state_dir).context("Failed to create state directory")?;

        Ok(Self {
            file_path: state_dir.join(STORAGE_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)?;
        info!("Stored {} in {}", key, self.file_path.display());
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
            info!("Removed {} from {}", key, self.file_path.display());
        }
        Ok(())
    }

    // --- Helper Methods ---

    /// A missing or corrupt file reads as an empty store.
    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = fs::read_to_string(&self.file_path).context("Failed to read local storage")?;
        match serde_json::from_str(&json) {
            Ok(items) => Ok(items),
            Err(e) => {
                debug!("Ignoring unreadable {}: {e}", self.file_path.display());
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&self.file_path, json).context("Failed to write local storage")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).unwrap();

        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "{\"ts\":1}").unwrap();
        storage.set_item("other", "x").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("{\"ts\":1}"));

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        assert_eq!(storage.get_item("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested")).unwrap();
        fs::write(storage.path(), "not json").unwrap();

        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
