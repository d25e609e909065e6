//! Key-value persistence.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

use super::StoreError;

/// A simple string store.
pub trait KeyValueStore {
    /// Fetches the value stored under `key`, if there is one.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// An in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(HashMap<String, String>);

impl From<HashMap<String, String>> for MemoryStore {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store that keeps each key in its own file under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &path)?;
        trace!(path = %path.display(), "wrote");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use maplit::hashmap;

    use super::*;

    #[test]
    fn memory() {
        let mut store = MemoryStore::from(hashmap! {
            "a".to_string() => "1".to_string(),
        });
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap(), None);
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get("stats").unwrap(), None);
        store.set("stats", "{}").unwrap();
        assert_eq!(store.get("stats").unwrap().as_deref(), Some("{}"));
        store.set("stats", "{\"a\":1}").unwrap();
        assert_eq!(store.get("stats").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(!dir.path().join("nested/stats.json.tmp").exists());

        let reopened = FileStore::new(dir.path().join("nested"));
        assert_eq!(reopened.get("stats").unwrap().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn file_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let mut store = FileStore::new(&blocker);
        assert!(matches!(store.set("stats", "{}"), Err(StoreError::Io(_))));
    }
}
