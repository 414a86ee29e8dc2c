//! File-backed storage slots.
//!
//! Each slot key maps to one JSON file in the data directory. Characters
//! outside `[A-Za-z0-9_-]` in the key become `_`, so `persist:root` is stored
//! as `persist_root.json`. Writes go to a sibling temp file first and are
//! renamed into place, so a crash mid-write leaves the previous state intact.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use shop_inventory_core::{Storage, StorageError};

/// Storage slots kept as files under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for slot files. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path for a slot key.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_path_for_sanitizes_key() {
        let storage = FileStorage::new("/data");
        assert_eq!(
            storage.path_for("persist:root"),
            PathBuf::from("/data/persist_root.json")
        );
        assert_eq!(
            storage.path_for("a-b_c"),
            PathBuf::from("/data/a-b_c.json")
        );
    }

    #[test]
    fn test_read_missing_slot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        assert!(storage.read("persist:root").unwrap().is_none());
    }

    #[test]
    fn test_write_creates_dir_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("nested").join("data"));

        storage.write("persist:root", "first").unwrap();
        storage.write("persist:root", "second").unwrap();

        assert_eq!(storage.read("persist:root").unwrap().as_deref(), Some("second"));
        assert!(!storage.path_for("persist:root").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_read_error_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        // A directory where the slot file should be cannot be read as a string.
        fs::create_dir_all(storage.path_for("persist:root")).unwrap();
        assert!(matches!(
            storage.read("persist:root"),
            Err(StorageError::Io(_))
        ));
    }
}
