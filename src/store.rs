//! The task store
//!
//! Owns the ordered task collection, hands out ids, and writes the whole
//! collection back to storage after every change.

use crate::error::ValidationError;
use crate::id::IdGenerator;
use crate::snapshot;
use crate::task::{Filter, Task, TaskId};
use chrono::{DateTime, SubsecRound, Utc};
use iced::futures::channel::mpsc;
use iced_local_storage::Storage;

/// Key under which the snapshot is stored
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Change notifications emitted after each mutation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// A task was appended
    Added(Task),
    /// A task's completion flag changed
    Toggled { id: TaskId, completed: bool },
    /// A task was removed
    Deleted(Task),
    /// The collection changed but could not be written back
    PersistFailed { message: String },
}

pub struct TaskStore<S> {
    tasks: Vec<Task>,
    ids: IdGenerator,
    storage: S,
    key: String,
    listeners: Vec<mpsc::UnboundedSender<StoreEvent>>,
}

impl<S: std::fmt::Debug> std::fmt::Debug for TaskStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TaskStore {{ key: {}, tasks: {}, listeners: {}, storage: {:?} }}",
            self.key,
            self.tasks.len(),
            self.listeners.len(),
            self.storage
        )
    }
}

impl<S: Storage> TaskStore<S> {
    /// Open a store on the default key, loading any persisted tasks
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Open a store on a specific key, loading any persisted tasks
    ///
    /// A missing or malformed snapshot opens as an empty list.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = snapshot::decode_or_empty(storage.get_item(&key).as_deref());

        let mut ids = IdGenerator::new();
        if let Some(max) = tasks.iter().map(|task| task.id).max() {
            ids.observe(max);
        }

        tracing::debug!(key = %key, tasks = tasks.len(), "loaded task snapshot");

        Self {
            tasks,
            ids,
            storage,
            key,
            listeners: Vec::new(),
        }
    }

    /// Append a new task
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] when the title is blank; the
    /// collection is left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use iced_local_storage::MemoryStorage;
    /// use iced_todo::TaskStore;
    ///
    /// let mut store = TaskStore::open(MemoryStorage::new());
    /// let task = store.add("Buy milk").unwrap();
    /// assert!(!task.completed);
    /// assert!(store.add("   ").is_err());
    /// assert_eq!(store.len(), 1);
    /// ```
    pub fn add(&mut self, title: &str) -> Result<Task, ValidationError> {
        self.add_at(title, Utc::now())
    }

    fn add_at(&mut self, title: &str, now: DateTime<Utc>) -> Result<Task, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        // Snapshots only carry milliseconds.
        let created_at = now.trunc_subsecs(3);
        let id = self.ids.next_id_at(created_at.timestamp_millis());
        let task = Task::new(id, title, created_at);

        tracing::debug!(id, title = %task.title, "added task");
        self.tasks.push(task.clone());
        self.commit(StoreEvent::Added(task.clone()));

        Ok(task)
    }

    /// Flip the completion flag of a task
    ///
    /// Returns the new flag, or `None` if no task has that id.
    pub fn toggle(&mut self, id: TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;

        tracing::debug!(id, completed, "toggled task");
        self.commit(StoreEvent::Toggled { id, completed });

        Some(completed)
    }

    /// Remove a task
    ///
    /// Completion is not required here; the UI only offers deletion for
    /// completed tasks. Returns the removed task, or `None` if absent.
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let task = self.tasks.remove(index);

        tracing::debug!(id, "deleted task");
        self.commit(StoreEvent::Deleted(task.clone()));

        Some(task)
    }

    fn commit(&mut self, event: StoreEvent) {
        let persisted = match snapshot::encode(&self.tasks) {
            Ok(raw) => self.storage.set_item(&self.key, raw).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        self.emit(event);

        if let Err(message) = persisted {
            tracing::error!(key = %self.key, error = %message, "failed to persist tasks");
            self.emit(StoreEvent::PersistFailed { message });
        }
    }
}

impl<S> TaskStore<S> {
    /// Tasks visible under `filter`, in insertion order
    pub fn filtered_view(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.matches(filter)).collect()
    }

    /// Every task in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Storage key holding the snapshot
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Receive a [`StoreEvent`] for every subsequent change
    ///
    /// Dropped receivers are forgotten on the next change.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StoreEvent> {
        let (sender, receiver) = mpsc::unbounded();
        self.listeners.push(sender);
        receiver
    }

    fn emit(&mut self, event: StoreEvent) {
        self.listeners
            .retain(|sender| sender.unbounded_send(event.clone()).is_ok());
    }
}
