use std::io;
use std::path::PathBuf;

use super::{Storage, StorageError};

/// On-disk storage backend: one file per key under a state directory.
///
/// This is the native-client stand-in for browser local storage. Values
/// are small strings, so plain files beat anything fancier; a write is a
/// single `fs::write` and a read a single `fs::read_to_string`.
#[derive(Clone)]
pub struct DiskStorage {
    dir: PathBuf,
}

impl DiskStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for DiskStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(dir.path().to_path_buf());

        assert!(storage.get("missing").unwrap().is_none());

        storage.set("careguide.authenticated", "true").unwrap();
        assert_eq!(
            storage.get("careguide.authenticated").unwrap().as_deref(),
            Some("true")
        );

        storage.remove("careguide.authenticated").unwrap();
        assert!(storage.get("careguide.authenticated").unwrap().is_none());

        // Removing an absent key is fine
        storage.remove("careguide.authenticated").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let storage = DiskStorage::new(dir.path().to_path_buf());
        storage.set("careguide.last_activity", "1700000000000").unwrap();

        let reopened = DiskStorage::new(dir.path().to_path_buf());
        assert_eq!(
            reopened.get("careguide.last_activity").unwrap().as_deref(),
            Some("1700000000000")
        );
    }
}
