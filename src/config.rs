//! Runtime configuration

use crate::error::TodoError;
use crate::store::DEFAULT_STORAGE_KEY;
use iced_local_storage::{AppName, FileStorage, STORAGE_FILE};
use std::path::PathBuf;

/// Overrides the directory holding the storage file
pub const DATA_DIR_ENV: &str = "ICED_TODO_DATA_DIR";
/// Log filter used when `RUST_LOG` is not set
pub const LOG_ENV: &str = "ICED_TODO_LOG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub app_name: AppName,
    pub storage_key: String,
    pub data_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: AppName::new("dev", "iced-todo", "todo-list"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults with the environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = var(DATA_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(filter) = var(LOG_ENV).filter(|filter| !filter.trim().is_empty()) {
            self.log_filter = filter;
        }

        self
    }

    /// Where the storage file lives
    pub fn storage_path(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.join(STORAGE_FILE),
            None => self.app_name.storage_path(),
        }
    }

    /// Open the storage file, loading its entries
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`] if the file exists but cannot be read.
    pub fn open_storage(&self) -> Result<FileStorage, TodoError> {
        Ok(FileStorage::open_at(self.storage_path())?)
    }
}
