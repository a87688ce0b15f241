use iced_local_storage::StorageError;
use thiserror::Error;

/// A user-correctable problem with input to the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please, provide a task name")]
    EmptyTitle,
}

/// Errors surfaced while setting up the to-do list
#[derive(Error, Debug)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
