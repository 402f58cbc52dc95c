//! File-backed storage: one JSON file per key under a data directory.

use crate::storage::backend::StoreBackend;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each key as `<root>/<key>.json`.
///
/// Keys are restricted to ASCII alphanumerics, `_`, and `-` so they map
/// onto filenames without escaping. All keys the store layer produces
/// satisfy this.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create the directory if needed and open a backend rooted there.
    pub fn create(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

/// Reject keys that could escape the data directory or collide on disk.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(Error::Other(format!("Invalid store key: {}", key)));
    }
    Ok(())
}

impl StoreBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::write(&path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn backend_type(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_absent_key() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::create(dir.path()).unwrap();
        assert_eq!(backend.get("users").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::create(dir.path()).unwrap();
        backend.set("users", "[]").unwrap();
        assert_eq!(backend.get("users").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::create(dir.path()).unwrap();
        backend.set("currentUser", "a").unwrap();
        backend.set("currentUser", "b").unwrap();
        assert_eq!(backend.get("currentUser").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::create(dir.path()).unwrap();
        backend.set("currentUser", "a").unwrap();
        backend.remove("currentUser").unwrap();
        assert_eq!(backend.get("currentUser").unwrap(), None);
        // Removing again is fine
        backend.remove("currentUser").unwrap();
    }

    #[test]
    fn test_rejects_path_traversal_key() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::create(dir.path()).unwrap();
        assert!(backend.get("../outside").is_err());
        assert!(backend.get("a/b").is_err());
        assert!(backend.get("").is_err());
    }
}
