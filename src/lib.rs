//! A to-do list for Iced
//!
//! Tasks can be added, completed, deleted and filtered. The whole list is
//! stored as one JSON snapshot in local storage and rewritten after every
//! change.
//!
//! # Example
//!
//! ```
//! use iced_local_storage::MemoryStorage;
//! use iced_todo::{Filter, TaskStore};
//!
//! let mut store = TaskStore::open(MemoryStorage::new());
//! let milk = store.add("Buy milk").unwrap();
//! store.add("Walk the dog").unwrap();
//! store.toggle(milk.id);
//!
//! assert_eq!(store.filtered_view(Filter::Active).len(), 1);
//! assert_eq!(store.filtered_view(Filter::Completed)[0].title, "Buy milk");
//! ```

pub mod app;
pub mod config;
mod error;
pub mod id;
pub mod logging;
pub mod snapshot;
pub mod store;
mod task;

pub use config::Config;
pub use error::{TodoError, ValidationError};
pub use id::IdGenerator;
pub use store::{DEFAULT_STORAGE_KEY, StoreEvent, TaskStore};
pub use task::{Filter, Task, TaskId};
