//! Local storage for Iced applications
//!
//! A string key-value store in the spirit of the browser's
//! `window.localStorage`. Every entry of an application lives in one
//! JSON object file under the platform configuration directory.
//!
//! # Example
//!
//! ```
//! use iced_local_storage::{MemoryStorage, Storage};
//!
//! let mut storage = MemoryStorage::new();
//! storage.set_item("tasks", "[]".to_string())?;
//! assert_eq!(storage.get_item("tasks").as_deref(), Some("[]"));
//! # Ok::<(), iced_local_storage::StorageError>(())
//! ```

mod app_name;
mod error;
mod storage;

pub use app_name::{AppName, STORAGE_FILE};
pub use error::StorageError;
pub use storage::{FileStorage, MemoryStorage, Storage, load_entries};
