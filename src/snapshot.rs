//! Persisted snapshot of the task collection
//!
//! The snapshot is a compact JSON array of task records stored under a
//! single key. It is always written whole and read whole.

use crate::task::{Task, TaskId};
use serde::de::Error as _;

/// Largest id a JavaScript number can hold exactly (`Number.MAX_SAFE_INTEGER`)
pub const MAX_SAFE_ID: TaskId = 9_007_199_254_740_991;

/// Serialize the full collection
pub fn encode(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Parse a snapshot, failing on anything that is not a valid task array
pub fn decode(raw: &str) -> Result<Vec<Task>, serde_json::Error> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;

    if let Some(task) = tasks.iter().find(|task| task.id > MAX_SAFE_ID) {
        return Err(serde_json::Error::custom(format!(
            "task id {} exceeds {MAX_SAFE_ID}",
            task.id
        )));
    }

    Ok(tasks)
}

/// Parse a stored snapshot, treating absent or malformed data as no tasks
pub fn decode_or_empty(raw: Option<&str>) -> Vec<Task> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match decode(raw) {
        Ok(tasks) => tasks,
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed task snapshot");
            Vec::new()
        }
    }
}
