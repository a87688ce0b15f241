//! Storage backends for persisting string entries

use crate::app_name::AppName;
use crate::error::StorageError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A synchronous string key-value store
///
/// Values are opaque strings; callers serialize structured data themselves.
/// Every write replaces the previous value of the key.
pub trait Storage {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove `key`, returning `true` if it was present
    fn remove_item(&mut self, key: &str) -> Result<bool, StorageError>;

    /// All keys currently stored, sorted
    fn keys(&self) -> Vec<String>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<bool, StorageError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

fn sorted_keys(entries: &HashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<String> = entries.keys().cloned().collect();
    keys.sort();
    keys
}

/// In-memory storage that forgets everything when dropped
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStorage
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> Vec<String> {
        sorted_keys(&self.entries)
    }
}

/// Storage backed by a single JSON object file
///
/// The file is read once on open and cached in memory. Each write rewrites
/// the whole file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Open the storage file of an application
    ///
    /// # Example
    ///
    /// ```no_run
    /// use iced_local_storage::{AppName, FileStorage, Storage};
    ///
    /// let app_name = AppName::new("dev", "iced-todo", "todo-list");
    /// let storage = FileStorage::open(&app_name)?;
    /// let tasks = storage.get_item("tasks");
    /// # Ok::<(), iced_local_storage::StorageError>(())
    /// ```
    pub fn open(app_name: &AppName) -> Result<Self, StorageError> {
        Self::open_at(app_name.storage_path())
    }

    /// Open a storage file at an explicit path
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = load_entries(&path)?;
        tracing::debug!(path = ?path, entries = entries.len(), "opened storage file");

        Ok(Self { path, entries })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        save_entries(&self.path, &self.entries)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<bool, StorageError> {
        if self.entries.remove(key).is_none() {
            return Ok(false);
        }

        self.flush()?;
        Ok(true)
    }

    fn keys(&self) -> Vec<String> {
        sorted_keys(&self.entries)
    }
}

/// Load the entries of a storage file
///
/// A missing or empty file yields no entries. A file that is not a JSON
/// object of strings is discarded with a warning.
pub fn load_entries(path: &Path) -> Result<HashMap<String, String>, StorageError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };

    if contents.trim().is_empty() {
        return Ok(HashMap::new());
    }

    match serde_json::from_str(&contents) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "discarding unreadable storage file");
            Ok(HashMap::new())
        }
    }
}

/// Save entries to a storage file
///
/// Creates the parent directory if it doesn't exist.
/// The data is saved as pretty-printed JSON.
fn save_entries(path: &Path, entries: &HashMap<String, String>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StorageError::directory(parent, e))?;
    }

    let contents = serde_json::to_string_pretty(entries)?;
    fs::write(path, contents)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_storage_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("tasks"), None);

        storage.set_item("tasks", "[]".to_string()).unwrap();
        storage.set_item("tasks", "[1]".to_string()).unwrap();
        assert_eq!(storage.get_item("tasks").as_deref(), Some("[1]"));

        assert!(storage.remove_item("tasks").unwrap());
        assert!(!storage.remove_item("tasks").unwrap());
        assert!(storage.keys().is_empty());
    }

    #[test]
    fn keys_are_sorted() {
        let storage: MemoryStorage = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
        assert_eq!(storage.keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn boxed_storage_forwards_calls() {
        let mut storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        storage.set_item("k", "v".to_string()).unwrap();
        assert_eq!(storage.get_item("k").as_deref(), Some("v"));
        assert_eq!(storage.keys(), vec!["k"]);
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open_at(dir.path().join("absent.json")).unwrap();
        assert!(storage.keys().is_empty());
    }

    #[test]
    fn file_storage_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store").join("local_storage.json");

        let mut storage = FileStorage::open_at(&path).unwrap();
        storage.set_item("tasks", r#"[{"id":1}]"#.to_string()).unwrap();
        storage.set_item("other", "x".to_string()).unwrap();
        assert!(storage.remove_item("other").unwrap());

        let reopened = FileStorage::open_at(&path).unwrap();
        assert_eq!(reopened.get_item("tasks").as_deref(), Some(r#"[{"id":1}]"#));
        assert_eq!(reopened.get_item("other"), None);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn corrupt_file_opens_empty_and_is_replaced_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local_storage.json");
        fs::write(&path, "not json at all").unwrap();

        let mut storage = FileStorage::open_at(&path).unwrap();
        assert!(storage.keys().is_empty());

        storage.set_item("tasks", "[]".to_string()).unwrap();
        let entries = load_entries(&path).unwrap();
        assert_eq!(entries.get("tasks").map(String::as_str), Some("[]"));
    }

    #[test]
    fn empty_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local_storage.json");
        fs::write(&path, "  \n").unwrap();

        assert!(load_entries(&path).unwrap().is_empty());
    }

    #[test]
    fn removing_absent_key_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local_storage.json");

        let mut storage = FileStorage::open_at(&path).unwrap();
        assert!(!storage.remove_item("tasks").unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn write_into_file_parent_fails_with_directory_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        let mut storage = FileStorage::open_at(blocker.join("local_storage.json")).unwrap();
        fs::write(&blocker, "file, not a directory").unwrap();

        let err = storage.set_item("tasks", "[]".to_string()).unwrap_err();
        assert!(matches!(err, StorageError::Directory { .. }));
    }
}
